//! The image resource bundled with the executable.

use crate::error::SetupError;

/// Resource directory embedded in the binary: 2 tag bytes, the
/// little-endian byte size of the first item, then the BMP scene itself.
static SCENE: &[u8] = include_bytes!("../assets/scene.res");

/// Directory header plus at least a BMP file header.
const MIN_LEN: usize = 6 + 14;

/// Returns the embedded resource directory blob.
pub fn locate() -> Result<&'static [u8], SetupError> {
    if SCENE.len() < MIN_LEN {
        return Err(SetupError::ResourceNotFound);
    }
    Ok(SCENE)
}
