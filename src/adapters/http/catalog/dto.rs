//! HTTP DTOs for catalog endpoints.

use serde::Deserialize;
use serde_json::Number;

use crate::domain::foundation::Money;
use crate::domain::membership::{MembershipError, NewPackage, PackageDuration, PackageUpdate};

/// Reads `duration_months` as whole months.
///
/// Integral floats such as `3.0` are accepted; `1.5` is not.
pub fn parse_duration(value: &Number) -> Result<PackageDuration, MembershipError> {
    if let Some(months) = value.as_i64() {
        return PackageDuration::from_months(months);
    }
    match value.as_f64() {
        Some(months) if months.fract() == 0.0 => PackageDuration::from_months(months as i64),
        _ => Err(MembershipError::invalid_duration(format!(
            "duration_months must be a whole number of months (got {})",
            value
        ))),
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePackageRequest {
    pub name: String,
    /// `0` only for the Day Pass.
    pub duration_months: Number,
    /// Minor units.
    pub price: i64,
    pub description: Option<String>,
}

impl TryFrom<CreatePackageRequest> for NewPackage {
    type Error = MembershipError;

    fn try_from(request: CreatePackageRequest) -> Result<Self, Self::Error> {
        Ok(NewPackage {
            duration: parse_duration(&request.duration_months)?,
            price: Money::try_new(request.price, "price")?,
            name: request.name,
            description: request.description,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub duration_months: Option<Number>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl TryFrom<UpdatePackageRequest> for PackageUpdate {
    type Error = MembershipError;

    fn try_from(request: UpdatePackageRequest) -> Result<Self, Self::Error> {
        Ok(PackageUpdate {
            name: request.name,
            duration: request.duration_months.as_ref().map(parse_duration).transpose()?,
            price: request
                .price
                .map(|p| Money::try_new(p, "price"))
                .transpose()?,
            description: request.description,
            is_active: request.is_active,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentMethodRequest {
    pub name: String,
}
