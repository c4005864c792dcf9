//! Strike scenes and animation frame sequences.
//!
//! A [`Scene`] is one lightning strike: a main bolt plus its branches.
//! An animation is a list of [`Frame`]s alternating between a freshly
//! generated strike and a blank frame, which plays back as a strobe.

use rand::Rng;

use crate::{
    bolt::Bolt,
    config::GeneratorConfig,
    error::Result,
    strike::{self, StrikeBounds},
    types::SegmentId,
};

/// One renderable strike.
///
/// `bolts()[0]` is the main bolt; every other bolt is a branch. Branch `i`
/// grew from the end of main segment `attachments()[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    bolts: Vec<Bolt>,
    attachments: Vec<SegmentId>,
}

impl Scene {
    pub(crate) fn new(main: Bolt, branches: Vec<(SegmentId, Bolt)>) -> Self {
        let mut bolts = Vec::with_capacity(branches.len() + 1);
        let mut attachments = Vec::with_capacity(branches.len());
        bolts.push(main);
        for (id, bolt) in branches {
            attachments.push(id);
            bolts.push(bolt);
        }
        Self { bolts, attachments }
    }

    /// All bolts in draw order, main bolt first.
    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn main_bolt(&self) -> &Bolt {
        &self.bolts[0]
    }

    pub fn branches(&self) -> &[Bolt] {
        &self.bolts[1..]
    }

    /// Main-bolt segment index each branch is attached to, in branch order.
    pub fn attachments(&self) -> &[SegmentId] {
        &self.attachments
    }

    /// Total number of segments across all bolts.
    pub fn segment_count(&self) -> usize {
        self.bolts.iter().map(|b| b.segments().len()).sum()
    }
}

/// One frame of an animation.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    /// The background with a strike drawn over it.
    Flash(Scene),
    /// The unmodified background.
    Blank,
}

impl Frame {
    pub fn scene(&self) -> Option<&Scene> {
        match self {
            Frame::Flash(scene) => Some(scene),
            Frame::Blank => None,
        }
    }
}

/// Produces the single strike of a still image.
pub fn compose_still(
    bounds: &StrikeBounds,
    cfg: &GeneratorConfig,
    rng: &mut impl Rng,
) -> Result<Scene> {
    strike::generate_strike(bounds, cfg, rng)
}

/// Produces `cfg.frame_count` flash frames, each followed by a blank frame.
///
/// Every flash carries an independently generated strike.
pub fn compose_animation(
    bounds: &StrikeBounds,
    cfg: &GeneratorConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Frame>> {
    let mut frames = Vec::with_capacity(cfg.frame_count as usize * 2);
    for _ in 0..cfg.frame_count {
        let scene = strike::generate_strike(bounds, cfg, rng)?;
        frames.push(Frame::Flash(scene));
        frames.push(Frame::Blank);
    }
    log::debug!("composed {} animation frames", frames.len());
    Ok(frames)
}
