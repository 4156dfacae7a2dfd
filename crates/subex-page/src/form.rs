use subex_status::{ContainerResolver, StatusRenderer};

/// A form field as seen at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub required: bool,
}

impl<'a> Field<'a> {
    pub fn required(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            value,
            required: true,
        }
    }

    pub fn optional(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            value,
            required: false,
        }
    }
}

/// Names of required fields whose value is blank, in form order.
pub fn validate_required<'a>(fields: &[Field<'a>]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|f| f.required && f.value.trim().is_empty())
        .map(|f| f.name)
        .collect()
}

/// Validate before submit. On failure the missing fields are listed in an
/// error at `target` and `false` is returned.
pub fn check_form<R: ContainerResolver>(
    renderer: &StatusRenderer<R>,
    target: &str,
    fields: &[Field<'_>],
) -> bool {
    let missing = validate_required(fields);
    if missing.is_empty() {
        return true;
    }
    renderer.show_error(
        target,
        &format!("Please fill in the required fields: {}", missing.join(", ")),
    );
    false
}
