/// One scheduled step of a reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Start fading in the word at this index
    ShowWord(usize),
    /// The last word finished fading in
    Complete,
}

/// A reveal step tagged with the render generation that scheduled it.
///
/// Every render bumps the generation, so tasks left over from replaced
/// content are recognised and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTask {
    pub generation: u64,
    pub step: RevealStep,
}

impl RevealTask {
    pub fn new(generation: u64, step: RevealStep) -> Self {
        Self { generation, step }
    }
}
