//! Gold savings schemes and customer enrollments.

use common_utils::{
    custom_serde,
    types::{MajorUnit, ResourceId},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::enums::{InstallmentStatus, UserSchemeStatus};

/// A plan template a customer can enroll in
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Scheme {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(alias = "scheme_name")]
    pub name: String,
    /// Duration of the plan in months
    #[serde(default, alias = "timeline", alias = "duration_months")]
    pub timeline_months: Option<u32>,
    #[serde(default, alias = "min_monthly_amount", alias = "minimum_amount")]
    pub min_amount: Option<MajorUnit>,
    #[serde(default, alias = "is_popular")]
    pub popular: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default, alias = "brochures")]
    pub brochure_urls: Vec<String>,
}

impl Scheme {
    /// Whether `amount` satisfies the scheme's minimum monthly amount
    pub fn accepts_amount(&self, amount: MajorUnit) -> bool {
        amount.is_positive() && self.min_amount.map_or(true, |min| amount >= min)
    }
}

/// One installment of an enrollment
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SchemePayment {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default, alias = "month")]
    pub installment_number: Option<u32>,
    #[serde(default, with = "custom_serde::date::option")]
    pub due_date: Option<Date>,
    pub amount: MajorUnit,
    #[serde(default)]
    pub status: InstallmentStatus,
    #[serde(default, alias = "order_id")]
    pub gateway_order_id: Option<String>,
    #[serde(default, alias = "payment_id")]
    pub gateway_payment_id: Option<String>,
}

impl SchemePayment {
    pub fn is_pending(&self) -> bool {
        matches!(
            self.status,
            InstallmentStatus::Pending | InstallmentStatus::Failed
        )
    }
}

/// A customer's enrollment in a scheme
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct UserScheme {
    #[serde(alias = "_id")]
    pub id: ResourceId,
    #[serde(default)]
    pub scheme: Option<Scheme>,
    #[serde(default)]
    pub scheme_id: Option<ResourceId>,
    pub monthly_amount: MajorUnit,
    #[serde(default, with = "custom_serde::date::option")]
    pub start_date: Option<Date>,
    #[serde(default, with = "custom_serde::date::option")]
    pub end_date: Option<Date>,
    #[serde(default, alias = "amount_paid", alias = "total_amount_paid")]
    pub total_paid: MajorUnit,
    #[serde(default)]
    pub status: UserSchemeStatus,
    #[serde(default, alias = "installments", alias = "scheme_payments")]
    pub payments: Vec<SchemePayment>,
}

impl UserScheme {
    /// Installments in installment-number order
    pub fn installments(&self) -> Vec<&SchemePayment> {
        let mut installments: Vec<&SchemePayment> = self.payments.iter().collect();
        installments.sort_by_key(|payment| payment.installment_number.unwrap_or(u32::MAX));
        installments
    }

    /// The earliest installment still waiting for payment
    pub fn next_pending_installment(&self) -> Option<&SchemePayment> {
        self.installments()
            .into_iter()
            .find(|payment| payment.is_pending())
    }

    pub fn find_installment(&self, installment_id: &ResourceId) -> Option<&SchemePayment> {
        self.payments
            .iter()
            .find(|payment| &payment.id == installment_id)
    }
}

/// Body of `POST /user-schemes/enroll`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EnrollRequest {
    pub scheme_id: ResourceId,
    pub monthly_amount: MajorUnit,
}
