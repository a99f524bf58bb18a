use std::collections::HashMap;

/// Lowercase tag to the number of published posts carrying it.
pub type Tags = HashMap<String, usize>;
