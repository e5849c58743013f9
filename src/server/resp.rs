use serde::Serialize;

/// Result codes reported in the `errorCode` field of every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespCode {
    Success,
    ParamInputEmpty,
    ParamInputFormateError,
    ExceptionError,
    BackendCheckSessionFail,
}

impl RespCode {
    pub fn code(self) -> i32 {
        match self {
            RespCode::Success => 0,
            RespCode::ParamInputEmpty => 1000,
            RespCode::ParamInputFormateError => 1001,
            RespCode::ExceptionError => 9998,
            RespCode::BackendCheckSessionFail => 9999,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RespCode::Success => "",
            RespCode::ParamInputEmpty => "param Input Empty",
            RespCode::ParamInputFormateError => "param Input formate error",
            RespCode::ExceptionError => "ExceptionError",
            RespCode::BackendCheckSessionFail => "Session無效或過期",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub error_code: i32,
    pub error_message: &'static str,
}

impl From<RespCode> for Envelope {
    fn from(code: RespCode) -> Self {
        Self {
            error_code: code.code(),
            error_message: code.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_uses_camel_case_wire_names() {
        let value = serde_json::to_value(Envelope::from(RespCode::ParamInputFormateError)).unwrap();
        assert_eq!(value, json!({ "errorCode": 1001, "errorMessage": "param Input formate error" }));
    }

    #[test]
    fn success_is_zero_with_empty_message() {
        let env = Envelope::from(RespCode::Success);
        assert_eq!(env.error_code, 0);
        assert!(env.error_message.is_empty());
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            RespCode::Success,
            RespCode::ParamInputEmpty,
            RespCode::ParamInputFormateError,
            RespCode::ExceptionError,
            RespCode::BackendCheckSessionFail,
        ].map(RespCode::code);
        assert_eq!(codes, [0, 1000, 1001, 9998, 9999]);
    }
}
