use uuid::Uuid;

/// Fresh random (v4) UUID in the 36-character hyphenated form.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
