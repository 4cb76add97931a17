use regex::Regex;

/// A failed validation for one form field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Signup form fields, validated together before submission
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Run every field validator and collect all failures
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let checks: [(&'static str, Option<String>); 5] = [
            ("name", validate_name(&self.name).err()),
            ("email", validate_email(&self.email).err()),
            ("phone", validate_phone(&self.phone).err()),
            ("password", validate_password(&self.password).err()),
            (
                "confirm_password",
                validate_confirm_password(&self.confirm_password, &self.password).err(),
            ),
        ];
        for (field, error) in checks {
            if let Some(message) = error {
                errors.push(FieldError { field, message });
            }
        }
        errors
    }
}

/// Name: 3-50 characters, letters and spaces only
pub fn validate_name(value: &str) -> Result<(), String> {
    if value.trim().len() < 3 {
        return Err("Name must be at least 3 characters long".to_string());
    }
    if value.len() > 50 {
        return Err("Name must not exceed 50 characters".to_string());
    }
    let pattern = Regex::new(r"^[a-zA-Z\s]+$").expect("valid pattern");
    if !pattern.is_match(value) {
        return Err("Name should only contain letters and spaces".to_string());
    }
    Ok(())
}

/// Basic email shape check
pub fn validate_email(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("Email is required".to_string());
    }
    let pattern =
        Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("valid pattern");
    if !pattern.is_match(value) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

/// 10-digit Indian mobile number starting with 6-9; spaces and dashes are
/// stripped before checking
pub fn validate_phone(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("Phone number is required".to_string());
    }
    let cleaned: String = value.chars().filter(|c| *c != ' ' && *c != '-').collect();
    let pattern = Regex::new(r"^[6-9]\d{9}$").expect("valid pattern");
    if !pattern.is_match(&cleaned) {
        return Err(
            "Please enter a valid 10-digit Indian mobile number (starting with 6-9)".to_string(),
        );
    }
    Ok(())
}

/// Password: at least 8 characters with a lowercase, an uppercase and a digit
pub fn validate_password(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("Password is required".to_string());
    }
    if value.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number".to_string());
    }
    Ok(())
}

/// Confirmation must be present and match the password
pub fn validate_confirm_password(value: &str, password: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("Please confirm your password".to_string());
    }
    if value != password {
        return Err("Passwords do not match".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rules() {
        assert!(validate_name("Asha Rao").is_ok());
        assert!(validate_name("Al").is_err());
        assert!(validate_name(&"a".repeat(51)).is_err());
        assert!(validate_name("R2 D2").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("asha@example.com").is_ok());
        assert!(validate_email("Asha.Rao+trips@Example.co.in").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("9876543210").is_ok());
        // Separators are tolerated
        assert!(validate_phone("98765 43210").is_ok());
        assert!(validate_phone("98765-43210").is_ok());
        // Must start 6-9 and be exactly 10 digits
        assert!(validate_phone("1234567890").is_err());
        assert!(validate_phone("98765").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("Secret12").is_ok());
        assert!(validate_password("short1A").is_err());
        assert!(validate_password("alllower1").is_err());
        assert!(validate_password("ALLUPPER1").is_err());
        assert!(validate_password("NoDigits").is_err());
    }

    #[test]
    fn test_form_collects_all_failures() {
        let form = SignupForm {
            name: "Al".to_string(),
            email: "bad".to_string(),
            phone: "123".to_string(),
            password: "weak".to_string(),
            confirm_password: "different".to_string(),
        };

        let errors = form.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["name", "email", "phone", "password", "confirm_password"]
        );
    }

    #[test]
    fn test_valid_form_passes() {
        let form = SignupForm {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            password: "Secret123".to_string(),
            confirm_password: "Secret123".to_string(),
        };
        assert!(form.validate().is_empty());
    }
}
