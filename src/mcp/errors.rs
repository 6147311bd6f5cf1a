pub const UNKNOWN_TOOL: &str = "unknown_tool";
pub const INVALID_ARGUMENT: &str = "invalid_argument";
pub const INVALID_ADDRESS: &str = "invalid_address";
pub const DOCUMENT_NOT_FOUND: &str = "document_not_found";
pub const TYPE_MISMATCH: &str = "type_mismatch";
pub const EXTERNAL_OPERATION_FAILED: &str = "external_operation_failed";
