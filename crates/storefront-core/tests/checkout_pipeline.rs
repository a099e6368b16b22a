//! End-to-end checkout against a file-backed cart and a scripted gateway.

use async_trait::async_trait;
use std::sync::Mutex;
use storefront_core::prelude::*;

struct ScriptedGateway {
    capture_error: Option<&'static str>,
    captured: Mutex<Vec<(OrderId, String)>>,
}

impl ScriptedGateway {
    fn new(capture_error: Option<&'static str>) -> Self {
        Self {
            capture_error,
            captured: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl OrderGateway for ScriptedGateway {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, GatewayError> {
        let body = serde_json::json!({
            "id": 101,
            "userId": 9,
            "items": request.items,
            "totalAmount": request.total_amount,
            "status": "pending",
            "paymentStatus": "pending",
            "paymentMethod": request.payment_method,
            "shippingAddress": request.shipping_address,
            "billingAddress": request.billing_address,
            "createdAt": "2024-05-04T10:11:12.000001"
        });
        serde_json::from_value(body).map_err(|e| GatewayError::new(e.to_string()))
    }

    async fn capture_payment(
        &self,
        order_id: OrderId,
        request: &PaymentRequest,
    ) -> Result<PaymentCapture, GatewayError> {
        self.captured
            .lock()
            .unwrap()
            .push((order_id, request.payment_method_id.to_string()));
        match self.capture_error {
            Some(message) => Err(GatewayError::new(message)),
            None => Ok(PaymentCapture {
                client_secret: "demo_secret_1".to_string(),
                order_id: Some(order_id),
            }),
        }
    }
}

fn billing() -> Address {
    Address {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        street: "7 Harbor Rd".to_string(),
        city: "Arlington".to_string(),
        state: "VA".to_string(),
        zip_code: "22201".to_string(),
        ..Address::default()
    }
}

fn stock_cart(store: &mut CartStore) {
    let tee = Product::new(ProductId::new(1), "Classic Tee", Money::from_dollars(20), "men");
    let cap = Product::new(ProductId::new(2), "Cap", Money::from_dollars(15), "accessories");
    store.add_item(tee.to_cart_item(2));
    store.add_item(cap.to_cart_item(1));
}

fn ready_flow() -> CheckoutFlow {
    let mut flow = CheckoutFlow::new();
    flow.set_billing_address(billing());
    flow.advance().unwrap();
    let card = CardDetails::new("4000 0000 0000 0002", "12/30", "123");
    flow.capture_instrument(DemoCollector.collect_card(&card).unwrap());
    flow
}

#[tokio::test]
async fn test_declined_card_leaves_persisted_cart_intact() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CartStore::open(Cache::open(dir.path()).unwrap());
    stock_cart(&mut store);
    assert_eq!(store.cart().total_amount, Money::from_dollars(55));
    assert_eq!(store.cart().total_items, 3);

    let gateway = ScriptedGateway::new(Some("card_declined"));
    let mut flow = ready_flow();

    let err = OrderSubmitter::new(&gateway)
        .submit(&mut flow, &mut store)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "card_declined");
    assert_eq!(err.orphaned_order(), Some(OrderId::new(101)));
    assert_eq!(flow.step(), CheckoutStep::Failed);
    assert_eq!(flow.error(), Some("card_declined"));
    assert_eq!(
        *gateway.captured.lock().unwrap(),
        vec![(OrderId::new(101), "pm_demo_0002".to_string())]
    );

    let reopened = CartStore::open(Cache::open(dir.path()).unwrap());
    assert_eq!(reopened.cart().total_items, 3);
    assert_eq!(reopened.cart().total_amount, Money::from_dollars(55));
}

#[tokio::test]
async fn test_retry_after_decline_places_order_and_clears_cart() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CartStore::open(Cache::open(dir.path()).unwrap());
    stock_cart(&mut store);
    let mut flow = ready_flow();

    let declining = ScriptedGateway::new(Some("card_declined"));
    assert!(OrderSubmitter::new(&declining)
        .submit(&mut flow, &mut store)
        .await
        .is_err());

    let accepting = ScriptedGateway::new(None);
    let confirmation = OrderSubmitter::new(&accepting)
        .submit(&mut flow, &mut store)
        .await
        .unwrap();

    assert_eq!(confirmation.redirect_path, "/orders/101");
    assert_eq!(confirmation.order.items.len(), 2);
    assert!(flow.is_complete());
    assert!(CartStore::open(Cache::open(dir.path()).unwrap()).is_empty());
}

#[tokio::test]
async fn test_separate_shipping_address_reaches_the_request() {
    let mut store = CartStore::new();
    stock_cart(&mut store);

    let mut flow = CheckoutFlow::new();
    flow.set_billing_address(billing());
    flow.set_shipping_same_as_billing(false);
    flow.update_shipping(AddressField::Street, "1 Dock St");
    flow.advance().unwrap();
    flow.set_payment_method(PaymentMethod::Paypal);
    flow.capture_instrument(DemoCollector.collect_paypal().unwrap());

    let gateway = ScriptedGateway::new(None);
    let confirmation = OrderSubmitter::new(&gateway)
        .submit(&mut flow, &mut store)
        .await
        .unwrap();

    assert_eq!(confirmation.order.shipping_address.street, "1 Dock St");
    assert_eq!(confirmation.order.billing_address.street, "7 Harbor Rd");
    assert_eq!(confirmation.order.payment_method, Some(PaymentMethod::Paypal));
}

#[test]
fn test_shipping_toggle_round_trip_discards_shipping_address() {
    let mut flow = CheckoutFlow::new();
    flow.set_billing_address(billing());
    flow.set_shipping_same_as_billing(false);
    flow.update_shipping(AddressField::City, "Elsewhere");
    flow.set_shipping_same_as_billing(true);

    assert_eq!(flow.shipping_address(), None);
    assert_eq!(flow.effective_shipping_address(), billing());
}
