use crate::clock::Clock;
use crate::config::StorefrontConfig;
use crate::domain::cart::{Cart, CartLine};
use crate::domain::order::{Order, OrderStatus, PaymentMethod, ShippingDetails};
use crate::domain::user::User;
use crate::forms::checkout::ShippingForm;
use crate::ids::IdGenerator;
use crate::repository::{CartWriter, SessionReader, SessionWriter};
use crate::services::{simulate_latency, ServiceError, ServiceResult};

/// Stage of the checkout dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Collecting the shipping contact.
    Shipping,
    /// Choosing a payment option and confirming the amount.
    Payment,
    /// Order placed, showing the receipt.
    Confirmed,
}

/// Amounts shown on the payment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSummary {
    /// Goods total across the snapshotted lines.
    pub subtotal_cents: i64,
    /// Flat delivery fee from the configuration.
    pub delivery_fee_cents: i64,
    /// Amount the shopper is asked to pay.
    pub payable_cents: i64,
}

/// One run through checkout.
///
/// The flow snapshots the cart when it starts, so later cart edits do not
/// leak into an order that is already being paid for. Steps advance
/// strictly forward; calling an operation out of order returns
/// [`ServiceError::CheckoutStepMismatch`].
#[derive(Debug)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    lines: Vec<CartLine>,
    total_cents: i64,
    shipping_form: ShippingForm,
    contact: Option<ShippingDetails>,
    payment_method: PaymentMethod,
    order: Option<Order>,
}

impl CheckoutFlow {
    /// Opens checkout over the current cart, prefilled from the signed-in
    /// user where one exists.
    pub fn start(cart: &Cart, user: Option<&User>) -> ServiceResult<Self> {
        if cart.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        Ok(Self {
            step: CheckoutStep::Shipping,
            lines: cart.lines().to_vec(),
            total_cents: cart.total_cents(),
            shipping_form: ShippingForm::prefill(user),
            contact: None,
            payment_method: PaymentMethod::default(),
            order: None,
        })
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Lines captured when the flow started.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Goods total captured when the flow started.
    pub fn total_cents(&self) -> i64 {
        self.total_cents
    }

    /// Current state of the shipping form, for rendering.
    pub fn shipping_form(&self) -> &ShippingForm {
        &self.shipping_form
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The placed order, once the flow reaches the confirmation step.
    pub fn confirmed_order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// Accepts the shipping form and advances to the payment step.
    pub fn submit_shipping(&mut self, form: ShippingForm) -> ServiceResult<()> {
        if self.step != CheckoutStep::Shipping {
            return Err(ServiceError::CheckoutStepMismatch {
                expected: "shipping",
            });
        }

        let details = form
            .clone()
            .into_shipping_details()
            .map_err(|err| ServiceError::Form(err.to_string()))?;

        self.shipping_form = form;
        self.contact = Some(details);
        self.step = CheckoutStep::Payment;

        Ok(())
    }

    /// Switches the payment option shown on the payment step.
    pub fn select_payment(&mut self, method: PaymentMethod) -> ServiceResult<()> {
        if self.step != CheckoutStep::Payment {
            return Err(ServiceError::CheckoutStepMismatch {
                expected: "payment",
            });
        }

        self.payment_method = method;

        Ok(())
    }

    /// Amounts for the payment step. The delivery fee is added to the
    /// payable amount only; the order keeps the goods total.
    pub fn payment_summary(&self, config: &StorefrontConfig) -> PaymentSummary {
        PaymentSummary {
            subtotal_cents: self.total_cents,
            delivery_fee_cents: config.delivery_fee_cents,
            payable_cents: self.total_cents + config.delivery_fee_cents,
        }
    }

    /// Places the order and advances to the confirmation step.
    ///
    /// Runs the simulated payment-processing pause, then the confirmation
    /// pause, before handing the order back. A flow places at most one
    /// order.
    pub fn place_order<C, G>(
        &mut self,
        clock: &C,
        ids: &G,
        config: &StorefrontConfig,
    ) -> ServiceResult<Order>
    where
        C: Clock,
        G: IdGenerator,
    {
        match self.step {
            CheckoutStep::Confirmed => return Err(ServiceError::CheckoutCompleted),
            CheckoutStep::Shipping => {
                return Err(ServiceError::CheckoutStepMismatch {
                    expected: "payment",
                })
            }
            CheckoutStep::Payment => {}
        }

        let contact = self
            .contact
            .as_ref()
            .ok_or(ServiceError::CheckoutStepMismatch {
                expected: "payment",
            })?;

        simulate_latency(config.checkout_processing_delay);

        let order = Order {
            id: ids.order_id(),
            status: OrderStatus::Pending,
            total_cents: self.total_cents,
            payment_method: self.payment_method,
            customer_name: contact.name.clone(),
            customer_email: contact.email.clone(),
            customer_phone: contact.phone.clone(),
            shipping_address: contact.address.clone(),
            product_names: self
                .lines
                .iter()
                .map(|line| line.product.name.clone())
                .collect(),
            item_count: self.lines.iter().map(|line| line.quantity).sum(),
            cover_url: self
                .lines
                .first()
                .and_then(|line| line.product.media.first())
                .map(|media| media.url.clone()),
            created_at: clock.now(),
        };

        self.order = Some(order.clone());
        self.step = CheckoutStep::Confirmed;

        simulate_latency(config.order_confirmation_delay);

        Ok(order)
    }
}

/// Records a placed order against the session.
///
/// Prepends the order to the signed-in user's history, awards one loyalty
/// point per full `loyalty_cents_per_point` of the goods total, and drops
/// the persisted cart. Without a session the cart is still dropped.
pub fn complete_order<R>(
    repo: &R,
    order: &Order,
    config: &StorefrontConfig,
) -> ServiceResult<Option<User>>
where
    R: SessionReader + SessionWriter + CartWriter + ?Sized,
{
    let updated = match repo.current_user().map_err(ServiceError::from)? {
        Some(mut user) => {
            user.orders.insert(0, order.clone());
            user.points += order.total_cents / config.loyalty_cents_per_point;
            repo.save_user(&user).map_err(ServiceError::from)?;
            Some(user)
        }
        None => None,
    };

    repo.clear_cart().map_err(ServiceError::from)?;

    Ok(updated)
}
