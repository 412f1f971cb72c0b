//! Length-prefixed field codec.
//!
//! Each field is written as `[1B length] [length bytes]`. There are no
//! presence flags: optional fields are simply omitted, and a reader must
//! know the field order of the secret type it is parsing.

use zeroize::Zeroizing;

use crate::error::SecretError;

/// Largest field a one-byte length prefix can describe.
pub const MAX_FIELD_LEN: usize = u8::MAX as usize;

/// Accumulates length-prefixed fields into a zeroizing buffer.
///
/// A failed push leaves nothing behind for the caller: the writer is
/// consumed by [`FieldWriter::finish`] only on success, and its buffer is
/// wiped when dropped.
#[derive(Default)]
pub(crate) struct FieldWriter {
    buf: Zeroizing<Vec<u8>>,
}

impl FieldWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append one field.
    pub(crate) fn push(&mut self, field: &'static str, bytes: &[u8]) -> Result<(), SecretError> {
        let len = u8::try_from(bytes.len()).map_err(|_| SecretError::FieldTooLarge {
            field,
            len: bytes.len(),
        })?;
        self.buf.push(len);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Append a field only when it is present.
    pub(crate) fn push_optional(
        &mut self,
        field: &'static str,
        bytes: Option<&[u8]>,
    ) -> Result<(), SecretError> {
        match bytes {
            Some(bytes) => self.push(field, bytes),
            None => Ok(()),
        }
    }

    pub(crate) fn finish(self) -> Zeroizing<Vec<u8>> {
        self.buf
    }
}

/// Reads length-prefixed fields back out of an encoded payload.
pub(crate) struct FieldReader<'a> {
    rest: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub(crate) const fn new(bytes: &'a [u8]) -> Self {
        Self { rest: bytes }
    }

    /// Read a mandatory field.
    pub(crate) fn read(&mut self, field: &'static str) -> Result<&'a [u8], SecretError> {
        self.read_optional(field)?
            .ok_or_else(|| SecretError::MalformedPayload(format!("missing field `{field}`")))
    }

    /// Read a field if any bytes remain.
    pub(crate) fn read_optional(
        &mut self,
        field: &'static str,
    ) -> Result<Option<&'a [u8]>, SecretError> {
        let Some((&len, tail)) = self.rest.split_first() else {
            return Ok(None);
        };
        let len = usize::from(len);
        if tail.len() < len {
            return Err(SecretError::MalformedPayload(format!(
                "field `{field}` declares {len} bytes but only {} remain",
                tail.len()
            )));
        }
        let (value, rest) = tail.split_at(len);
        self.rest = rest;
        Ok(Some(value))
    }

    /// Fail if unread bytes remain.
    pub(crate) fn finish(self) -> Result<(), SecretError> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(SecretError::MalformedPayload(format!(
                "{} trailing bytes after last field",
                self.rest.len()
            )))
        }
    }
}

/// Split an encoded payload into its raw field contents, in order.
///
/// Useful to inspect a payload without knowing its secret type.
///
/// # Errors
///
/// Returns [`SecretError::MalformedPayload`] if a length prefix runs past
/// the end of `bytes`.
pub fn split_fields(bytes: &[u8]) -> Result<Vec<&[u8]>, SecretError> {
    let mut reader = FieldReader::new(bytes);
    let mut fields = Vec::new();
    while let Some(field) = reader.read_optional("field")? {
        fields.push(field);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_writes_length_then_bytes() {
        let mut writer = FieldWriter::new();
        writer.push("a", b"abc").unwrap();
        writer.push("b", b"").unwrap();
        assert_eq!(writer.finish().as_slice(), &[3, b'a', b'b', b'c', 0]);
    }

    #[test]
    fn push_accepts_exactly_255_bytes() {
        let mut writer = FieldWriter::new();
        writer.push("a", &[7u8; MAX_FIELD_LEN]).unwrap();
        let out = writer.finish();
        assert_eq!(out.len(), MAX_FIELD_LEN + 1);
        assert_eq!(out[0], 255);
    }

    #[test]
    fn push_rejects_256_bytes() {
        let mut writer = FieldWriter::new();
        let err = writer.push("seed", &[0u8; 256]).unwrap_err();
        assert_eq!(
            err,
            SecretError::FieldTooLarge {
                field: "seed",
                len: 256
            }
        );
    }

    #[test]
    fn push_optional_skips_absent_field() {
        let mut writer = FieldWriter::new();
        writer.push_optional("login", None).unwrap();
        writer.push_optional("url", Some(b"x")).unwrap();
        assert_eq!(writer.finish().as_slice(), &[1, b'x']);
    }

    #[test]
    fn reader_detects_truncation() {
        let mut reader = FieldReader::new(&[5, 1, 2]);
        let err = reader.read("seed").unwrap_err();
        assert!(matches!(err, SecretError::MalformedPayload(_)));
    }

    #[test]
    fn reader_detects_trailing_bytes() {
        let mut reader = FieldReader::new(&[1, 9, 4]);
        assert_eq!(reader.read("seed").unwrap(), &[9]);
        assert!(reader.finish().is_err());
    }

    #[test]
    fn reader_reports_missing_mandatory_field() {
        let mut reader = FieldReader::new(&[]);
        let err = reader.read("password").unwrap_err().to_string();
        assert!(err.contains("missing field `password`"), "unexpected: {err}");
    }

    #[test]
    fn split_fields_returns_contents_in_order() {
        let fields = split_fields(&[2, b'h', b'i', 0, 1, b'!']).unwrap();
        assert_eq!(fields, vec![&b"hi"[..], &b""[..], &b"!"[..]]);
        assert!(split_fields(&[]).unwrap().is_empty());
    }
}
