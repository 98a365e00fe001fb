use crate::constants::MAX_FIELD_LENGTH;
use crate::errors::Error;
use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Shape of the body accepted when registering a client to a trip
static REGISTRATION_VALIDATOR: Lazy<Result<Validator, String>> = Lazy::new(|| {
    let text = json!({
        "type": "string",
        "minLength": 1,
        "maxLength": MAX_FIELD_LENGTH,
        "pattern": "\\S"
    });
    let schema = json!({
        "type": "object",
        "required": ["IdTrip", "FirstName", "LastName", "Email", "Telephone", "Pesel"],
        "properties": {
            "IdTrip": { "type": "integer", "minimum": 1, "maximum": i32::MAX },
            "FirstName": text,
            "LastName": text,
            "Email": {
                "type": "string",
                "maxLength": MAX_FIELD_LENGTH,
                "pattern": "^[^@\\s]+@[^@\\s]+\\.[^@\\s]+$"
            },
            "Telephone": text,
            "Pesel": text,
            "PaymentDate": { "type": ["string", "null"] }
        }
    });
    jsonschema::validator_for(&schema).map_err(|e| e.to_string())
});

/// Checks a registration body against the expected shape
///
/// # Arguments
/// * `body` - The raw JSON body
///
/// # Returns
/// * `Result<(), Error>` - `Error::InvalidInput` listing every violation when the shape is wrong
pub fn validate_registration_body(body: &Value) -> Result<(), Error> {
    let validator = REGISTRATION_VALIDATOR
        .as_ref()
        .map_err(|e| Error::SchemaError(e.clone()))?;

    let problems: Vec<String> = validator
        .iter_errors(body)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("{}: {}", path, e)
            }
        })
        .collect();

    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "Invalid request body: {}",
            problems.join("; ")
        )))
    }
}
