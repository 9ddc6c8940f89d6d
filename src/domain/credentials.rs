//! Format checks for ATM credentials. Not a substitute for real authentication.

use crate::domain::CredentialError;

pub const PIN_LENGTH: usize = 5;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 32;

pub fn validate_pin(pin: &str) -> Result<(), CredentialError> {
    if pin.chars().count() != PIN_LENGTH {
        return Err(CredentialError::PinLength {
            expected: PIN_LENGTH,
        });
    }
    if !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(CredentialError::PinFormat);
    }
    Ok(())
}

/// Checks run in a fixed order and the first failure wins.
pub fn validate_password(password: &str) -> Result<(), CredentialError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN_LENGTH {
        return Err(CredentialError::PasswordTooShort);
    }
    if len > PASSWORD_MAX_LENGTH {
        return Err(CredentialError::PasswordTooLong);
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(CredentialError::MissingUppercase);
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(CredentialError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CredentialError::MissingDigit);
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(CredentialError::MissingSpecial);
    }
    Ok(())
}
