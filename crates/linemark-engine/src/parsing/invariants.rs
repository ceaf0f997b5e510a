use crate::encoding::decode;
use crate::error::OutlineError;
use crate::models::Line;

/// Verify that the stored indents agree with the pointer view.
///
/// Decoding rejects any pointer that does not reference an earlier line, then
/// depths are compared line by line.
pub fn check(lines: &[Line]) -> Result<(), OutlineError> {
    let decoded = decode(lines)?;
    match decoded
        .iter()
        .zip(lines)
        .position(|(expected, found)| expected.indent != found.indent)
    {
        Some(index) => Err(OutlineError::Inconsistent {
            index,
            expected: decoded[index].indent,
            found: lines[index].indent,
        }),
        None => Ok(()),
    }
}
