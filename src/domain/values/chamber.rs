use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    pub const ALL: [Chamber; 2] = [Chamber::House, Chamber::Senate];
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chamber::House => write!(f, "House"),
            Chamber::Senate => write!(f, "Senate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_serialized_names_match() {
        for chamber in Chamber::ALL {
            let json = serde_json::to_string(&chamber).unwrap();
            assert_eq!(json, format!("\"{chamber}\""));
        }
    }
}
