//! Automated Transaction creation bytes.
//!
//! Layout, all little-endian:
//!
//! ```text
//! u16 version | u16 0 | u16 code_pages | u16 data_pages | u16 cs_pages | u16 us_pages
//! u64 min_activation_planck
//! len(code) | code | len(data) | data
//! ```
//!
//! Each length field is 1, 2 or 4 bytes wide depending on whether the
//! matching page count times 256 is at most 256, at most 32767, or larger.

use tracing::debug;

use crate::error::{CryptoError, Result};

/// Bytes per AT page.
pub const PAGE_SIZE: usize = 256;

/// Largest page count a creation record can declare.
pub const MAX_PAGES: i32 = 32767;

const HEADER_LEN: usize = 20;

/// Builder for AT creation bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtCreation {
    version: u16,
    code: Vec<u8>,
    data: Vec<u8>,
    data_pages: i32,
    call_stack_pages: i32,
    user_stack_pages: i32,
    min_activation_planck: u64,
}

impl AtCreation {
    /// Start a record for `version` running `code`, with one page of each
    /// stack, no data and no minimum activation amount.
    pub fn new(version: u16, code: impl Into<Vec<u8>>) -> Self {
        Self {
            version,
            code: code.into(),
            data: Vec::new(),
            data_pages: 1,
            call_stack_pages: 1,
            user_stack_pages: 1,
            min_activation_planck: 0,
        }
    }

    /// Initial data.
    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// Data pages.
    pub fn data_pages(mut self, pages: i32) -> Self {
        self.data_pages = pages;
        self
    }

    /// Call stack pages.
    pub fn call_stack_pages(mut self, pages: i32) -> Self {
        self.call_stack_pages = pages;
        self
    }

    /// User stack pages.
    pub fn user_stack_pages(mut self, pages: i32) -> Self {
        self.user_stack_pages = pages;
        self
    }

    /// Minimum amount, in planck, that activates the AT.
    pub fn min_activation_planck(mut self, planck: u64) -> Self {
        self.min_activation_planck = planck;
        self
    }

    /// Pack the record.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let code_pages = self.code.len().div_ceil(PAGE_SIZE);
        let code_pages = i32::try_from(code_pages)
            .ok()
            .filter(|&p| p <= MAX_PAGES)
            .ok_or_else(|| {
                CryptoError::InvalidArgument(format!(
                    "code of {} bytes exceeds {MAX_PAGES} pages",
                    self.code.len()
                ))
            })?;
        let data_pages = check_pages("data", self.data_pages)?;
        let cs_pages = check_pages("call stack", self.call_stack_pages)?;
        let us_pages = check_pages("user stack", self.user_stack_pages)?;

        let data_capacity = data_pages as usize * PAGE_SIZE;
        if self.data.len() > data_capacity {
            return Err(CryptoError::InvalidArgument(format!(
                "data of {} bytes exceeds {data_pages} pages",
                self.data.len()
            )));
        }

        let code_len_width = length_width(code_pages);
        let data_len_width = length_width(data_pages);
        let mut out = Vec::with_capacity(
            HEADER_LEN + code_len_width + self.code.len() + data_len_width + self.data.len(),
        );

        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&(code_pages as u16).to_le_bytes());
        out.extend_from_slice(&data_pages.to_le_bytes());
        out.extend_from_slice(&cs_pages.to_le_bytes());
        out.extend_from_slice(&us_pages.to_le_bytes());
        out.extend_from_slice(&self.min_activation_planck.to_le_bytes());
        put_length(&mut out, code_len_width, self.code.len());
        out.extend_from_slice(&self.code);
        put_length(&mut out, data_len_width, self.data.len());
        out.extend_from_slice(&self.data);

        debug!(
            version = self.version,
            code_pages,
            data_pages,
            cs_pages,
            us_pages,
            len = out.len(),
            "packed AT creation bytes"
        );
        Ok(out)
    }
}

/// Pack an AT creation record in one call.
pub fn at_creation_bytes(
    version: u16,
    code: &[u8],
    data: &[u8],
    data_pages: i32,
    call_stack_pages: i32,
    user_stack_pages: i32,
    min_activation_planck: u64,
) -> Result<Vec<u8>> {
    AtCreation::new(version, code)
        .data(data)
        .data_pages(data_pages)
        .call_stack_pages(call_stack_pages)
        .user_stack_pages(user_stack_pages)
        .min_activation_planck(min_activation_planck)
        .to_bytes()
}

fn check_pages(what: &str, pages: i32) -> Result<u16> {
    if (0..=MAX_PAGES).contains(&pages) {
        Ok(pages as u16)
    } else {
        Err(CryptoError::InvalidArgument(format!(
            "{what} pages {pages} outside 0..={MAX_PAGES}"
        )))
    }
}

fn length_width(pages: impl Into<i32>) -> usize {
    let bytes = pages.into() * PAGE_SIZE as i32;
    if bytes <= 256 {
        1
    } else if bytes <= 32767 {
        2
    } else {
        4
    }
}

fn put_length(out: &mut Vec<u8>, width: usize, len: usize) {
    match width {
        1 => out.push(len as u8),
        2 => out.extend_from_slice(&(len as u16).to_le_bytes()),
        _ => out.extend_from_slice(&(len as u32).to_le_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "1e000000003901090000006400000000010d04001a0900000001";

    #[test]
    fn test_published_vector() {
        let code = hex::decode(CODE).unwrap();
        let bytes = at_creation_bytes(1, &code, &[], 1, 1, 1, 200_000_000).unwrap();
        assert_eq!(
            hex::encode(bytes),
            "01000000010001000100010000c2eb0b000000001a\
             1e000000003901090000006400000000010d04001a0900000001\
             00"
        );
    }

    #[test]
    fn test_two_byte_length_fields() {
        let code: Vec<u8> = (0..300u32).map(|i| (i * 7 % 256) as u8).collect();
        let bytes = AtCreation::new(2, code.clone())
            .data(vec![1, 2])
            .data_pages(2)
            .min_activation_planck(2)
            .to_bytes()
            .unwrap();
        assert_eq!(bytes.len(), 326);
        assert_eq!(
            hex::encode(&bytes[..22]),
            "02000000020002000100010002000000000000002c01"
        );
        assert_eq!(&bytes[22..322], code.as_slice());
        assert_eq!(&bytes[322..], &[2, 0, 1, 2]);
    }

    #[test]
    fn test_four_byte_length_field() {
        let code = vec![0xaa; 200 * PAGE_SIZE];
        let bytes = AtCreation::new(1, code).to_bytes().unwrap();
        assert_eq!(&bytes[4..6], &200u16.to_le_bytes());
        assert_eq!(&bytes[20..24], &((200 * PAGE_SIZE) as u32).to_le_bytes());
    }

    #[test]
    fn test_empty_code() {
        let bytes = AtCreation::new(1, Vec::new()).to_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 2);
        assert_eq!(&bytes[4..6], &[0, 0]);
    }

    #[test]
    fn test_rejects_bad_pages() {
        for pages in [-1, MAX_PAGES + 1] {
            assert!(AtCreation::new(1, vec![0]).data_pages(pages).to_bytes().is_err());
            assert!(AtCreation::new(1, vec![0]).call_stack_pages(pages).to_bytes().is_err());
            assert!(AtCreation::new(1, vec![0]).user_stack_pages(pages).to_bytes().is_err());
        }
    }

    #[test]
    fn test_rejects_data_over_capacity() {
        let result = AtCreation::new(1, vec![0]).data(vec![0; 257]).data_pages(1).to_bytes();
        assert!(matches!(result, Err(CryptoError::InvalidArgument(_))));
        assert!(AtCreation::new(1, vec![0]).data(vec![0; 256]).to_bytes().is_ok());
    }
}
