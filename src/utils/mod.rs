pub mod format;
pub mod fs;
#[cfg(test)]
pub mod test_utils;
