use crate::error::Result;
use crate::models::{ChoiceValue, ValueProvider};

/// CD frame size (2352 bytes of sector data + 96 bytes of subcode).
pub const CD_FRAME_SIZE: u32 = 2448;
const MAX_CD_FRAMES_PER_HUNK: u32 = 19;

/// Computes the selectable values for a named provider.
pub trait ValueResolver {
    fn resolve(&self, provider: ValueProvider) -> Result<Vec<ChoiceValue>>;
}

/// Hunk sizes that hold a whole number of CD frames.
pub fn hunk_sizes() -> Vec<String> {
    (1..=MAX_CD_FRAMES_PER_HUNK)
        .map(|frames| (CD_FRAME_SIZE * frames).to_string())
        .collect()
}

pub fn processor_counts() -> Vec<String> {
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (1..=available).map(|n| n.to_string()).collect()
}

/// Providers that need nothing but the local machine. Returns `None` for
/// providers backed by the external tool.
pub fn local_values(provider: ValueProvider) -> Option<Vec<ChoiceValue>> {
    let values = match provider {
        ValueProvider::HunkSizes => hunk_sizes(),
        ValueProvider::ProcessorCounts => processor_counts(),
        ValueProvider::HdTemplates => return None,
    };
    Some(values.into_iter().map(ChoiceValue::plain).collect())
}
