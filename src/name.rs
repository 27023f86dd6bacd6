use crate::error::{InvalidName, Result};

/// Assert that a cookie name was given and is not empty or blank.
pub fn assert_name_set(name: Option<&str>) -> Result<()> {
    let name = name.ok_or(InvalidName::Missing)?;
    if name.chars().all(|c| c.is_whitespace() || c == '\u{FEFF}') {
        return Err(InvalidName::Blank.into());
    }
    Ok(())
}
