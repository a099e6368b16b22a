//! Order endpoints.

use super::StorefrontApi;
use crate::FetchError;
use async_trait::async_trait;
use storefront_core::checkout::{
    CreateOrderRequest, GatewayError, Order, OrderGateway, PaymentCapture, PaymentRequest,
};
use storefront_core::ids::OrderId;

impl StorefrontApi {
    /// `POST /orders`
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, FetchError> {
        self.client
            .post("orders")
            .json(request)?
            .send()
            .await?
            .into_data()
    }

    /// `GET /orders/:id`
    pub async fn get_order(&self, id: OrderId) -> Result<Order, FetchError> {
        self.client
            .get(&format!("orders/{}", id))
            .send()
            .await?
            .into_data()
    }

    /// `GET /orders/user`, newest first.
    pub async fn user_orders(&self) -> Result<Vec<Order>, FetchError> {
        self.client.get("orders/user").send().await?.into_data()
    }

    /// `POST /orders/:id/payment`
    pub async fn capture_payment(
        &self,
        id: OrderId,
        request: &PaymentRequest,
    ) -> Result<PaymentCapture, FetchError> {
        self.client
            .post(&format!("orders/{}/payment", id))
            .json(request)?
            .send()
            .await?
            .into_data()
    }
}

#[async_trait]
impl OrderGateway for StorefrontApi {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, GatewayError> {
        Ok(StorefrontApi::create_order(self, request).await?)
    }

    async fn capture_payment(
        &self,
        order_id: OrderId,
        request: &PaymentRequest,
    ) -> Result<PaymentCapture, GatewayError> {
        Ok(StorefrontApi::capture_payment(self, order_id, request).await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::services::scripted;
    use serde_json::json;
    use storefront_core::cart::{CartStore, NewCartItem};
    use storefront_core::checkout::{
        Address, CheckoutFlow, CheckoutStep, OrderStatus, OrderSubmitter, PaymentInstrumentToken,
        SubmitError,
    };
    use storefront_core::ids::{OrderId, ProductId};
    use storefront_core::money::Money;

    fn order_json(id: u64) -> serde_json::Value {
        let address = json!({
            "firstName": "Ada", "lastName": "L", "street": "1 Main", "city": "X",
            "state": "Y", "zipCode": "1", "country": "US"
        });
        json!({
            "id": id,
            "userId": 3,
            "totalAmount": 40.0,
            "status": "pending",
            "paymentStatus": "pending",
            "paymentMethod": "credit_card",
            "shippingAddress": address,
            "billingAddress": address,
            "createdAt": "2024-01-02T03:04:05.678901",
            "items": [{"id": 1, "productId": 1, "name": "Tee", "price": 20.0, "quantity": 2}]
        })
    }

    fn ready() -> (CheckoutFlow, CartStore) {
        let mut flow = CheckoutFlow::new();
        flow.set_billing_address(Address {
            first_name: "Ada".to_string(),
            last_name: "L".to_string(),
            street: "1 Main".to_string(),
            city: "X".to_string(),
            state: "Y".to_string(),
            zip_code: "1".to_string(),
            ..Address::default()
        });
        flow.advance().unwrap();
        flow.capture_instrument(PaymentInstrumentToken::new("pm_demo_4242").unwrap());

        let mut cart = CartStore::new();
        cart.add_item(NewCartItem {
            product_id: ProductId::new(1),
            name: "Tee".to_string(),
            price: Money::from_dollars(20),
            quantity: 2,
            image_url: String::new(),
        });
        (flow, cart)
    }

    #[tokio::test]
    async fn test_get_order() {
        let (api, transport) = scripted(vec![(200, json!({"success": true, "data": order_json(5)}))]);
        let order = api.get_order(OrderId::new(5)).await.unwrap();
        assert_eq!(order.id, OrderId::new(5));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(transport.recorded()[0].url, "http://localhost:5000/api/orders/5");
    }

    #[tokio::test]
    async fn test_submission_over_http() {
        let (api, transport) = scripted(vec![
            (201, json!({"success": true, "data": order_json(101)})),
            (
                200,
                json!({"success": true, "data": {"clientSecret": "demo_secret_x", "orderId": 101}}),
            ),
        ]);
        let (mut flow, mut cart) = ready();

        let confirmation = OrderSubmitter::new(&api)
            .submit(&mut flow, &mut cart)
            .await
            .unwrap();
        assert_eq!(confirmation.redirect_path, "/orders/101");
        assert!(cart.is_empty());

        let recorded = transport.recorded();
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(recorded[0].url, "http://localhost:5000/api/orders");
        let body = recorded[0].body.clone().unwrap();
        assert_eq!(body["totalAmount"], 40.0);
        assert_eq!(body["paymentMethod"], "credit_card");
        assert_eq!(body["shippingAddress"]["zipCode"], "1");
        assert_eq!(recorded[1].url, "http://localhost:5000/api/orders/101/payment");
        assert_eq!(
            recorded[1].body,
            Some(json!({"paymentMethodId": "pm_demo_4242"}))
        );
    }

    #[tokio::test]
    async fn test_declined_capture_surfaces_server_error() {
        let (api, _) = scripted(vec![
            (201, json!({"success": true, "data": order_json(101)})),
            (402, json!({"success": false, "error": "card_declined"})),
        ]);
        let (mut flow, mut cart) = ready();

        let err = OrderSubmitter::new(&api)
            .submit(&mut flow, &mut cart)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmitError::PaymentCapture {
                order_id: OrderId::new(101),
                message: "card_declined".to_string()
            }
        );
        assert_eq!(flow.step(), CheckoutStep::Failed);
        assert_eq!(cart.cart().total_items, 2);
    }

    #[tokio::test]
    async fn test_order_creation_error_message() {
        let (api, transport) = scripted(vec![(500, json!({"success": false, "error": "db locked"}))]);
        let (mut flow, mut cart) = ready();

        let err = OrderSubmitter::new(&api)
            .submit(&mut flow, &mut cart)
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::OrderCreation("db locked".to_string()));
        assert_eq!(transport.recorded().len(), 1);
    }
}
