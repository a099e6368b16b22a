//! Product endpoints.

use super::StorefrontApi;
use crate::FetchError;
use storefront_core::catalog::{ListingSource, Product};
use storefront_core::ids::ProductId;

impl StorefrontApi {
    /// `GET /products`
    pub async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        self.client.get("products").send().await?.into_data()
    }

    /// `GET /products/:id`
    pub async fn get_product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.client
            .get(&format!("products/{}", id))
            .send()
            .await?
            .into_data()
    }

    /// `GET /products/category/:category`
    pub async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, FetchError> {
        let path = format!("products/category/{}", encode_segment(category));
        self.client.get(&path).send().await?.into_data()
    }

    /// `GET /products/search?q=`
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, FetchError> {
        self.client
            .get("products/search")
            .query("q", term)
            .send()
            .await?
            .into_data()
    }

    /// Fetch the product list for a listing page.
    pub async fn fetch_listing(&self, source: &ListingSource) -> Result<Vec<Product>, FetchError> {
        match source {
            ListingSource::Search(term) => self.search_products(term).await,
            ListingSource::Category(category) => self.products_by_category(category).await,
            ListingSource::All => self.list_products().await,
        }
    }
}

fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use crate::services::scripted;
    use serde_json::json;
    use storefront_core::catalog::ListingSource;
    use storefront_core::ids::ProductId;
    use storefront_core::money::Money;

    fn product_json(id: u64, name: &str, price: f64) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "description": "",
            "price": price,
            "imageUrl": "",
            "category": "men",
            "inStock": true
        })
    }

    #[tokio::test]
    async fn test_list_products() {
        let (api, transport) = scripted(vec![(
            200,
            json!({"success": true, "data": [product_json(1, "Tee", 19.99)]}),
        )]);

        let products = api.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, Money::new(1999));
        assert_eq!(transport.recorded()[0].url, "http://localhost:5000/api/products");
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let (api, _) = scripted(vec![(
            404,
            json!({"success": false, "error": "Product not found"}),
        )]);

        let err = api.get_product(ProductId::new(99)).await.unwrap_err();
        assert_eq!(err.user_message(), "Product not found");
    }

    #[tokio::test]
    async fn test_listing_source_selects_endpoint() {
        let ok = || (200, json!({"success": true, "data": []}));
        let (api, transport) = scripted(vec![ok(), ok(), ok()]);

        api.fetch_listing(&ListingSource::Search("wool coat".to_string()))
            .await
            .unwrap();
        api.fetch_listing(&ListingSource::Category("new arrivals".to_string()))
            .await
            .unwrap();
        api.fetch_listing(&ListingSource::All).await.unwrap();

        let urls: Vec<String> = transport.recorded().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:5000/api/products/search?q=wool+coat",
                "http://localhost:5000/api/products/category/new%20arrivals",
                "http://localhost:5000/api/products",
            ]
        );
    }
}
