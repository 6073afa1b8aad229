/// One commit as shown in release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Subject line of the commit message
    pub message: String,
    /// Full hexadecimal commit id
    pub hash: String,
}

impl CommitRecord {
    pub fn new(message: impl Into<String>, hash: impl Into<String>) -> Self {
        CommitRecord {
            message: message.into(),
            hash: hash.into(),
        }
    }

    /// First seven characters of the commit id.
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash() {
        let commit = CommitRecord::new("fix", "abcdef1234567");
        assert_eq!(commit.short_hash(), "abcdef1");
    }

    #[test]
    fn test_short_hash_of_short_id() {
        let commit = CommitRecord::new("fix", "abc");
        assert_eq!(commit.short_hash(), "abc");
    }
}
