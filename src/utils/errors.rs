use serde_json::json;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorCode {
    ServerStartError               = 0400,
    UnableToReadCredentials        = 0500,
    MongoDBError                   = 0503,
    InvalidBSON                    = 0504,
    InvalidJSON                    = 0505,
    IOError                        = 0506,
    DuplicateKeyViolation          = 0507,
    RunMandatory                   = 1000,
    RunNotPositive                 = 1001,
    RunTooLong                     = 1002,
    RunAlreadyExists               = 1003,
    DvMandatory                    = 1010,
    DvTooLong                      = 1011,
    NombreMandatory                = 1020,
    NombreTooLong                  = 1021,
    APaternoMandatory              = 1030,
    APaternoTooLong                = 1031,
    AMaternoMandatory              = 1040,
    AMaternoTooLong                = 1041,
    TelefonoMandatory              = 1050,
    TelefonoNotPositive            = 1051,
    TelefonoTooLong                = 1052,
    TelefonoAlreadyExists          = 1053,
    FechaRegistroMandatory         = 1060,
    CitizenMandatory               = 1100,
    CitizenNotFound                = 1101,
    IntentosFallidosNegative       = 2000,
    ContraseniaMandatory           = 2001,
    ContraseniaTooLong             = 2002,
    CorreoMandatory                = 2003,
    CorreoTooLong                  = 2004,
    CorreoAlreadyExists            = 2005,
    CorreoAlreadyInUse             = 2006,
    CredentialMandatory            = 2100,
    CredentialNotFound             = 2101,
}

impl ErrorCode {
    pub fn with_msg(&self, message: &str) -> CivitasError {
        CivitasError::new(*self, message)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CivitasError {
    error_code: ErrorCode,
    message: String,
}

impl CivitasError {
    pub fn new(error_code: ErrorCode, message: &str) -> Self {
        CivitasError { error_code, message: message.to_string() }
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for CivitasError {
    fn from(error: serde_json::Error) -> Self {
        ErrorCode::InvalidJSON.with_msg(&format!("Unable to convert to json: {}", error))
    }
}

impl From<mongodb::error::Error> for CivitasError {
    fn from(error: mongodb::error::Error) -> Self {
        match crate::db::mongo::is_duplicate_err(&error) {
            true  => ErrorCode::DuplicateKeyViolation.with_msg(&format!("Duplicate key violation: {}", error)),
            false => ErrorCode::MongoDBError.with_msg(&format!("MongoDB error: {}", error)),
        }
    }
}

impl From<bson::ser::Error> for CivitasError {
    fn from(error: bson::ser::Error) -> Self {
        ErrorCode::InvalidBSON.with_msg(&format!("Unable to serialise BSON: {}", error))
    }
}

impl From<bson::de::Error> for CivitasError {
    fn from(error: bson::de::Error) -> Self {
        ErrorCode::InvalidBSON.with_msg(&format!("Unable to deserialise BSON: {}", error))
    }
}

impl From<std::io::Error> for CivitasError {
    fn from(error: std::io::Error) -> Self {
        ErrorCode::IOError.with_msg(&format!("IO error: {}", error))
    }
}

///
/// Convert our internal error into an HTTP response.
///
/// The numeric error code is always included in the body so callers can react to a
/// specific failure without parsing the message text.
///
impl IntoResponse for CivitasError {
    fn into_response(self) -> Response {
        use ErrorCode::*;

        let status = match &self.error_code {
            IOError                 |
            InvalidBSON             |
            InvalidJSON             |
            MongoDBError            |
            ServerStartError        |
            UnableToReadCredentials => StatusCode::INTERNAL_SERVER_ERROR,

            CitizenNotFound    |
            CredentialNotFound => StatusCode::NOT_FOUND,

            AMaternoMandatory        |
            AMaternoTooLong          |
            APaternoMandatory        |
            APaternoTooLong          |
            CitizenMandatory         |
            ContraseniaMandatory     |
            ContraseniaTooLong       |
            CorreoAlreadyExists      |
            CorreoMandatory          |
            CorreoTooLong            |
            CredentialMandatory      |
            DvMandatory              |
            DvTooLong                |
            FechaRegistroMandatory   |
            IntentosFallidosNegative |
            NombreMandatory          |
            NombreTooLong            |
            RunAlreadyExists         |
            RunMandatory             |
            RunNotPositive           |
            RunTooLong               |
            TelefonoAlreadyExists    |
            TelefonoMandatory        |
            TelefonoNotPositive      |
            TelefonoTooLong => StatusCode::BAD_REQUEST,

            CorreoAlreadyInUse    |
            DuplicateKeyViolation => StatusCode::CONFLICT,
        };

        // Don't leak the details of internal failures to the caller.
        let message = match status.is_server_error() {
            true => {
                tracing::error!("{:?}: {}", self.error_code, self.message);
                String::from("Internal server error")
            },
            false => self.message,
        };

        let body = Json(json!({
            "code": self.error_code as u32,
            "message": message,
        }));

        (status, body).into_response()
    }
}
