use crate::dataset::ValidationError;
use crate::packer::PackingError;
use crate::writer::WriteError;

#[derive(Debug, derive_more::Display, derive_more::IsVariant)]
enum ErrorPayload {
    #[display(fmt = "Dataset validation error: {}", _0)]
    Validation(ValidationError),

    #[display(fmt = "Packing error: {}", _0)]
    Packing(PackingError),

    #[display(fmt = "Write error: {}", _0)]
    Write(WriteError),
}

#[derive(Debug, thiserror::Error)]
#[error("{payload}")]
pub struct Error {
    payload: ErrorPayload,
}

macro_rules! conv {
    ($variant: ident, $from_err: path) => {
        impl From<$from_err> for Error {
            fn from(value: $from_err) -> Error {
                Error {
                    payload: ErrorPayload::$variant(value),
                }
            }
        }
    };
}

conv!(Validation, ValidationError);
conv!(Packing, PackingError);
conv!(Write, WriteError);

impl Error {
    /// Was the dataset rejected before any bytes were produced?
    pub fn is_validation(&self) -> bool {
        self.payload.is_validation()
    }

    pub fn is_empty_dataset(&self) -> bool {
        self.as_validation_error()
            .map_or(false, |e| e.is_empty_dataset())
    }

    pub fn is_empty_elevation(&self) -> bool {
        self.as_validation_error()
            .map_or(false, |e| e.is_empty_elevation())
    }

    pub fn is_inconsistent_length(&self) -> bool {
        self.as_validation_error()
            .map_or(false, |e| e.is_inconsistent_length())
    }

    pub fn is_packing(&self) -> bool {
        self.payload.is_packing()
    }

    /// Did writing the packed file to its destination fail?
    pub fn is_write(&self) -> bool {
        self.payload.is_write()
    }

    pub fn as_validation_error(&self) -> Option<&ValidationError> {
        match &self.payload {
            ErrorPayload::Validation(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_packing_error(&self) -> Option<&PackingError> {
        match &self.payload {
            ErrorPayload::Packing(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_write_error(&self) -> Option<&WriteError> {
        match &self.payload {
            ErrorPayload::Write(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
