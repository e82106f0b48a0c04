use crate::registry::{EndpointDescriptor, QueryParams};

/// Outcome of checking a parameter set against an endpoint's contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Ok,
    /// At least one required parameter is absent. Carries the FULL required
    /// list so clients see the complete contract, not just what they missed.
    MissingRequired(Vec<String>),
    /// None of the alternative parameters are present.
    MissingAlternative(Vec<String>),
}

/// Check `params` against `descriptor`. The required constraint is evaluated
/// first and short-circuits the alternative constraint.
pub fn validate(descriptor: &EndpointDescriptor, params: &QueryParams) -> ValidationResult {
    if !descriptor.required_params.is_empty()
        && !descriptor
            .required_params
            .iter()
            .all(|key| params.contains_key(key))
    {
        return ValidationResult::MissingRequired(descriptor.required_params.clone());
    }

    if !descriptor.one_of_params.is_empty()
        && !descriptor
            .one_of_params
            .iter()
            .any(|key| params.contains_key(key))
    {
        return ValidationResult::MissingAlternative(descriptor.one_of_params.clone());
    }

    ValidationResult::Ok
}
