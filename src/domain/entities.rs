use serde::{Deserialize, Serialize};

// Records mirror the backend JSON shapes; field names follow the backend contract.

// Order as listed on the order board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub student_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub min_price: f64,
    #[serde(default)]
    pub max_price: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub response_count: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    // Backend spelling; true once this tutor has responded.
    #[serde(default)]
    pub is_responsed: bool,
}

// One page of the paginated order board.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    #[serde(rename = "Orders", default)]
    pub orders: Vec<Order>,
    #[serde(rename = "Pages", default)]
    pub pages: u32,
}

// A tutor's response to an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub tutor_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_final: bool,
}

// Full order view including the responses it has collected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub id: String,
    #[serde(default)]
    pub student_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub min_price: f64,
    #[serde(default)]
    pub max_price: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub response_count: u32,
    // Backend sends null when nobody has responded yet.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub responses: Vec<OrderResponse>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub is_responsed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: String,
    #[serde(default)]
    pub telegram_id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub tutor_id: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: String,
    // Reviews stay hidden from the public profile until the tutor activates them.
    #[serde(default)]
    pub is_active: bool,
}

// Editable tutor profile; keys are PascalCase on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TutorProfile {
    pub tutor: Tutor,
    #[serde(default)]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub response_count: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
