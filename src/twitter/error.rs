use egg_mode::error::Error as EggModeError;

pub const UNAUTHORIZED: u16 = 401;
pub const FORBIDDEN: u16 = 403;
pub const NOT_FOUND: u16 = 404;

// Twitter usually sends an error body instead of a bare status, so egg-mode doesn't give us the
// status code. These are the documented codes for the statuses we care about.
const UNAUTHORIZED_CODES: [i32; 3] = [32, 89, 135];
const FORBIDDEN_CODES: [i32; 8] = [63, 64, 136, 139, 179, 200, 220, 326];
const NOT_FOUND_CODES: [i32; 4] = [8, 34, 50, 144];

/// A failed call to the Twitter API.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Twitter API returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Twitter API client error: {0}")]
    Client(#[source] EggModeError),
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Client(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(NOT_FOUND)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(FORBIDDEN)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(UNAUTHORIZED)
    }

    fn status_for_code(code: i32) -> Option<u16> {
        if UNAUTHORIZED_CODES.contains(&code) {
            Some(UNAUTHORIZED)
        } else if FORBIDDEN_CODES.contains(&code) {
            Some(FORBIDDEN)
        } else if NOT_FOUND_CODES.contains(&code) {
            Some(NOT_FOUND)
        } else {
            None
        }
    }
}

impl From<EggModeError> for Error {
    fn from(e: EggModeError) -> Self {
        match e {
            EggModeError::BadStatus(status) => Error::Status {
                status: status.as_u16(),
                message: status.to_string(),
            },
            EggModeError::TwitterError(headers, errors) => {
                let status = errors
                    .errors
                    .iter()
                    .find_map(|error| Error::status_for_code(error.code));

                match status {
                    Some(status) => Error::Status {
                        status,
                        message: errors
                            .errors
                            .iter()
                            .map(|error| format!("#{}: {}", error.code, error.message))
                            .collect::<Vec<_>>()
                            .join(", "),
                    },
                    None => Error::Client(EggModeError::TwitterError(headers, errors)),
                }
            }
            other => Error::Client(other),
        }
    }
}
