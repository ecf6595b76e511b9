//! Payment method handlers.

use std::sync::Arc;

use crate::domain::foundation::PaymentMethodId;
use crate::domain::membership::{MembershipError, PaymentMethod};
use crate::ports::{Clock, PaymentMethodRepository};

#[derive(Debug, Clone)]
pub struct CreatePaymentMethodCommand {
    pub name: String,
}

pub struct CreatePaymentMethodHandler {
    methods: Arc<dyn PaymentMethodRepository>,
    clock: Arc<dyn Clock>,
}

impl CreatePaymentMethodHandler {
    pub fn new(methods: Arc<dyn PaymentMethodRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { methods, clock }
    }

    pub async fn handle(&self, cmd: CreatePaymentMethodCommand) -> Result<PaymentMethod, MembershipError> {
        let method = PaymentMethod::create(PaymentMethodId::new(), &cmd.name, self.clock.now())?;
        self.methods.save(&method).await?;
        tracing::info!(payment_method = %method.name, "Payment method created");
        Ok(method)
    }
}

pub struct ListPaymentMethodsHandler {
    methods: Arc<dyn PaymentMethodRepository>,
}

impl ListPaymentMethodsHandler {
    pub fn new(methods: Arc<dyn PaymentMethodRepository>) -> Self {
        Self { methods }
    }

    pub async fn handle(&self, include_inactive: bool) -> Result<Vec<PaymentMethod>, MembershipError> {
        Ok(self.methods.list(include_inactive).await?)
    }
}
