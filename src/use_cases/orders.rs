use std::sync::Arc;

use crate::domain::entities::{OrderDetails, OrderPage};
use crate::domain::errors::GatewayError;
use crate::domain::request::{ApiRequest, path_id};
use crate::interface_adapters::protocol::{GreetingsBody, MarkRespondedBody, ResponseCreated};
use crate::use_cases::session::{SessionGateway, decode_json};

// Order board, order details and responding to an order.
pub struct OrdersUseCase {
    pub gateway: Arc<SessionGateway>,
}

// The tag filter is only sent when one is selected.
pub fn orders_page_request(size: u32, page: u32, tag: Option<&str>) -> ApiRequest {
    let request = ApiRequest::get("/orders/pagination")
        .query("size", size)
        .query("page", page);
    match tag.map(str::trim).filter(|tag| !tag.is_empty()) {
        Some(tag) => request.query("tag", tag),
        None => request,
    }
}

impl OrdersUseCase {
    #[tracing::instrument(name = "list_orders", skip_all, fields(size = size, page = page, tag = ?tag))]
    pub async fn list(
        &self,
        platform_credential: &str,
        size: u32,
        page: u32,
        tag: Option<&str>,
    ) -> Option<OrderPage> {
        let request = orders_page_request(size, page, tag);
        self.gateway
            .call("list_orders", platform_credential, request, None, |body| {
                decode_json(body).map(Some)
            })
            .await
    }

    #[tracing::instrument(name = "order_details", skip_all, fields(order_id = %order_id))]
    pub async fn details(&self, platform_credential: &str, order_id: &str) -> Option<OrderDetails> {
        let order_id = match path_id(order_id) {
            Ok(order_id) => order_id,
            Err(error) => {
                self.gateway.report("order_details", &error);
                return None;
            }
        };

        let request = ApiRequest::get("/orders/mini/id").segment(order_id);
        self.gateway
            .call("order_details", platform_credential, request, None, |body| {
                decode_json(body).map(Some)
            })
            .await
    }

    /// Create a response to the order, then mark the order as responded.
    ///
    /// The two writes are not atomic. A failed second write is reported but the
    /// response id from the first write is still returned; nothing is rolled back.
    #[tracing::instrument(name = "respond_to_order", skip_all, fields(order_id = %order_id))]
    pub async fn respond(
        &self,
        platform_credential: &str,
        order_id: &str,
        greetings: &str,
    ) -> Option<String> {
        let create = if greetings.trim().is_empty() {
            Err(GatewayError::InvalidInput("greetings are required".to_string()))
        } else {
            path_id(order_id).and_then(|order_id| {
                ApiRequest::post("/responses/id")
                    .segment(order_id)
                    .json(&GreetingsBody { greetings })
            })
        };
        let create = match create {
            Ok(request) => request,
            Err(error) => {
                self.gateway.report("respond_to_order", &error);
                return None;
            }
        };

        let response_id = self
            .gateway
            .call("respond_to_order", platform_credential, create, None, |body| {
                decode_json::<ResponseCreated>(body).map(|created| Some(created.response_id))
            })
            .await?;
        tracing::info!(response_id = %response_id, "response created");

        let marked = match ApiRequest::put("/orders/id")
            .segment(order_id)
            .json(&MarkRespondedBody { is_responded: true })
        {
            Ok(mark) => self.gateway.request(platform_credential, &mark).await,
            Err(error) => Err(error),
        };
        if let Err(error) = marked {
            tracing::warn!("order not marked as responded; response kept");
            self.gateway.report("mark_order_responded", &error);
        }

        Some(response_id)
    }
}
