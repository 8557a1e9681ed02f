//! Encoding results for the caller

use crate::types::OperationResult;

/// Serialize a result as a single JSON object
pub fn encode_result(result: &OperationResult, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    }
}

/// Process exit status for a result: 0 on success, 1 otherwise
pub fn exit_status(result: &OperationResult) -> u8 {
    if result.success {
        0
    } else {
        1
    }
}
