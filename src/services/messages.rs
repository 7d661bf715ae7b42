//! User-facing message text shared by every endpoint.

pub fn not_found(entity: &str) -> String {
    format!("{} not found", entity)
}

pub fn deleted(entity: &str) -> String {
    format!("{} deleted successfully", entity)
}

pub fn updated(entity: &str) -> String {
    format!("{} updated successfully", entity)
}

pub fn added(entity: &str) -> String {
    format!("{} added successfully", entity)
}

pub fn valid_url(field: &str) -> String {
    format!("{} must be a valid url", field)
}

pub fn required(fields: &[&str]) -> String {
    match fields {
        [one] => format!("{} is required", one),
        many => format!("{} are required", many.join(", ")),
    }
}

pub fn already_exists(entity: &str) -> String {
    format!("{} already exists, please choose another {}", entity, entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_lists_every_field() {
        assert_eq!(required(&["name"]), "name is required");
        assert_eq!(required(&["name", "logo_url"]), "name, logo_url are required");
    }

    #[test]
    fn already_exists_repeats_entity() {
        assert_eq!(already_exists("brand"), "brand already exists, please choose another brand");
    }
}
