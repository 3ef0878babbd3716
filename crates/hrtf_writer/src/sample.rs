//! Typed impulse responses.
//!
//! Measurement sets arrive in whatever sample type the recording used: 8-bit unsigned, 16-bit signed, 32-bit float,
//! and so on.  We keep that type until normalization because the integer range of the type is what decides the
//! scaling, and it is lost the moment the samples are cast.
use byteorder::ByteOrder;
use num::traits::{AsPrimitive, Bounded, Zero};

/// The samples of one impulse response, in the type they were measured with.
#[derive(Clone, Debug, PartialEq)]
pub enum ImpulseResponse {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    U64(Vec<u64>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Run `$body` with `$samples` bound to the inner vector, whatever its type.
macro_rules! dispatch {
    ($response: expr, $samples: ident => $body: expr) => {
        match $response {
            ImpulseResponse::U8($samples) => $body,
            ImpulseResponse::I8($samples) => $body,
            ImpulseResponse::U16($samples) => $body,
            ImpulseResponse::I16($samples) => $body,
            ImpulseResponse::U32($samples) => $body,
            ImpulseResponse::I32($samples) => $body,
            ImpulseResponse::U64($samples) => $body,
            ImpulseResponse::I64($samples) => $body,
            ImpulseResponse::F32($samples) => $body,
            ImpulseResponse::F64($samples) => $body,
        }
    };
}

macro_rules! from_vec {
    ($variant: ident, $t: ty) => {
        impl From<Vec<$t>> for ImpulseResponse {
            fn from(value: Vec<$t>) -> ImpulseResponse {
                ImpulseResponse::$variant(value)
            }
        }
    };
}

from_vec!(U8, u8);
from_vec!(I8, i8);
from_vec!(U16, u16);
from_vec!(I16, i16);
from_vec!(U32, u32);
from_vec!(I32, i32);
from_vec!(U64, u64);
from_vec!(I64, i64);
from_vec!(F32, f32);
from_vec!(F64, f64);

/// Map integer samples onto roughly `[-1, 1)`.
///
/// For a type with maximum `M`, unsigned types are first shifted down by `M / 2` and signed types are left alone; the
/// result is then divided by `M + 1`.  Dividing by one more than the maximum is what keeps the most negative signed
/// value at exactly -1.0 and everything else strictly inside the range.  All of the math happens in f64, so even the
/// 64-bit types cannot overflow.
pub fn normalize_integers<T>(samples: &[T]) -> Vec<f64>
where
    T: Bounded + Zero + PartialEq + AsPrimitive<f64>,
{
    let max: f64 = T::max_value().as_();
    let offset = if T::min_value() == T::zero() {
        max / 2.0
    } else {
        0.0
    };
    let scale = max + 1.0;

    samples.iter().map(|s| (s.as_() - offset) / scale).collect()
}

fn widen<T: AsPrimitive<f64>>(samples: &[T]) -> Vec<f64> {
    samples.iter().map(|s| s.as_()).collect()
}

impl ImpulseResponse {
    /// Number of samples in this response.
    pub fn len(&self) -> usize {
        dispatch!(self, s => s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Is this response stored as floating point samples?
    pub fn is_float(&self) -> bool {
        matches!(self, ImpulseResponse::F32(_) | ImpulseResponse::F64(_))
    }

    /// Get the samples as a slice, if this response already holds f64 data.
    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            ImpulseResponse::F64(s) => Some(&s[..]),
            _ => None,
        }
    }

    /// Convert to f64 samples, rescaling integer types.
    ///
    /// Integer types go through [normalize_integers].  Float types are only widened; their values are not touched.
    pub fn normalize_to_float64(&self) -> ImpulseResponse {
        let samples = match self {
            ImpulseResponse::U8(s) => normalize_integers(s),
            ImpulseResponse::I8(s) => normalize_integers(s),
            ImpulseResponse::U16(s) => normalize_integers(s),
            ImpulseResponse::I16(s) => normalize_integers(s),
            ImpulseResponse::U32(s) => normalize_integers(s),
            ImpulseResponse::I32(s) => normalize_integers(s),
            ImpulseResponse::U64(s) => normalize_integers(s),
            ImpulseResponse::I64(s) => normalize_integers(s),
            ImpulseResponse::F32(s) => widen(s),
            ImpulseResponse::F64(s) => s.clone(),
        };

        ImpulseResponse::F64(samples)
    }

    /// Append every sample to `out` as a 4-byte float in the byte order `B`.
    ///
    /// Samples which were never normalized are converted numerically, so an unnormalized `U8` response writes values in
    /// `0.0..=255.0`.
    pub(crate) fn extend_f32<B: ByteOrder>(&self, out: &mut Vec<u8>) {
        dispatch!(self, samples => {
            for s in samples.iter() {
                let mut word = [0u8; 4];
                B::write_f32(&mut word, AsPrimitive::<f32>::as_(*s));
                out.extend_from_slice(&word);
            }
        })
    }
}
