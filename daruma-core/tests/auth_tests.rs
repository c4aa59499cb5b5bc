use daruma_core::auth::{keyring, totp};
use daruma_core::types::{Credential, OtpSecret, ParamKey, StaticPassword};

// These integration tests require the mock keyring to be enabled via the
// `mock-keyring` feature. Run with:
//
// cargo test -p daruma-core --test auth_tests --features mock-keyring
//
#[cfg(feature = "mock-keyring")]
#[test]
fn integration_stored_credential_mints_passcodes() {
    // Clean up any existing entries
    let _ = keyring::delete(ParamKey::Password);
    let _ = keyring::delete(ParamKey::OtpSecret);

    keyring::set(ParamKey::Password, "Secr3t").expect("Failed to store password");
    keyring::set(ParamKey::OtpSecret, "JBSWY3DPEHPK3PXP").expect("Failed to store OTP secret");

    // Read the credential back the way startup does
    let password = keyring::get(ParamKey::Password).expect("Failed to retrieve password");
    let secret = keyring::get(ParamKey::OtpSecret).expect("Failed to retrieve OTP secret");
    let credential = Credential {
        password: StaticPassword::new(password),
        otp_secret: OtpSecret::new(secret),
    };

    totp::validate_secret(&credential.otp_secret).expect("Stored secret failed validation");

    let passcode =
        totp::generate_passcode(&credential.otp_secret).expect("Failed to mint a passcode");
    assert_eq!(passcode.expose().len(), 6);
    assert!(
        passcode.expose().chars().all(|c| c.is_ascii_digit()),
        "Passcode must be all decimal digits: {}",
        passcode.expose()
    );

    // Clean up
    let _ = keyring::delete(ParamKey::Password);
    let _ = keyring::delete(ParamKey::OtpSecret);
}

#[cfg(feature = "mock-keyring")]
#[test]
fn integration_storing_a_parameter_again_overwrites_it() {
    let _ = keyring::delete(ParamKey::Config);

    keyring::set(ParamKey::Config, "Old VPN").expect("Failed to store first value");
    keyring::set(ParamKey::Config, "Work VPN").expect("Failed to store second value");

    assert_eq!(
        keyring::get(ParamKey::Config).expect("Failed to retrieve value"),
        "Work VPN",
        "A second store must replace the first"
    );

    let _ = keyring::delete(ParamKey::Config);
}
