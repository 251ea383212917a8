use crate::call::ResultCategory;

/// Map a raw outcome label to its coarse category.
///
/// Total by construction: `ANSWERED` is the only success, the known failure
/// labels and anything unrecognized degrade to `Error`. No label can make
/// this fail.
pub fn classify(outcome: &str) -> ResultCategory {
    match outcome {
        "ANSWERED" => ResultCategory::Success,
        "NOANSWER" | "CONGESTION" => ResultCategory::Error,
        _ => ResultCategory::Error,
    }
}
