use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub jwt_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(jwt_secret: SecretString) -> Self {
        Self { jwt_secret }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(SecretString::from("test-secret".to_string()));
        assert_eq!(args.jwt_secret.expose_secret(), "test-secret");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let args = GlobalArgs::new(SecretString::from("test-secret".to_string()));
        let debug = format!("{args:?}");
        assert!(!debug.contains("test-secret"));
    }
}
