use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

use super::ai_service::NutritionService;
use crate::config::Config;
use crate::models::{NutritionLookup, NutritionRecord};

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub foods: Vec<Food>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub description: Option<String>,
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    pub nutrient_name: String,
    pub value: Option<f64>,
}

impl SearchResponse {
    /// Takes the first hit unconditionally; absent nutrients count as zero.
    pub fn into_lookup(self, food_name: &str) -> NutritionLookup {
        let Some(food) = self.foods.into_iter().next() else {
            return NutritionLookup::NotFound(food_name.to_string());
        };

        let nutrients: HashMap<&str, f64> = food
            .food_nutrients
            .iter()
            .map(|n| (n.nutrient_name.as_str(), n.value.unwrap_or(0.0)))
            .collect();
        let get = |name: &str| nutrients.get(name).copied().unwrap_or(0.0);

        NutritionLookup::Found(NutritionRecord {
            calories: get("Energy"),
            carbs: get("Carbohydrate, by difference"),
            sugar: get("Sugars, total including NLEA"),
            fat: get("Total lipid (fat)"),
            protein: get("Protein"),
            fiber: get("Fiber, total dietary"),
            food: food.description,
        })
    }
}

/// USDA FoodData Central search client.
pub struct UsdaClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl UsdaClient {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            api_key: config.usda_api_key.clone(),
            base_url: config.usda_api_url.clone(),
            client,
        }
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        log::info!("🔎 USDA search: {}", query);

        let response = self
            .client
            .get(format!("{}/foods/search", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("pageSize", "1"),
            ])
            .send()
            .await
            .context("USDA request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ USDA API error ({}): {}", status, error_text);
            anyhow::bail!("USDA API error ({}): {}", status, error_text);
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl NutritionService for UsdaClient {
    async fn lookup(&self, food_name: &str) -> Result<NutritionLookup> {
        let search = self.search(food_name).await?;
        Ok(search.into_lookup(food_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_client(server: &MockServer) -> UsdaClient {
        let config = Config::from_lookup(|key| match key {
            "WATSONX_API_KEY" | "WATSONX_URL" | "WATSONX_PROJECT_ID" => Some("x".to_string()),
            "USDA_API_KEY" => Some("usda-key".to_string()),
            "USDA_API_URL" => Some(server.url("/fdc/v1")),
            _ => None,
        })
        .unwrap();
        UsdaClient::new(&config, reqwest::Client::new())
    }

    #[test]
    fn test_empty_foods_not_found() {
        let response: SearchResponse = serde_json::from_value(json!({"totalHits": 0, "foods": []})).unwrap();
        assert_eq!(
            response.into_lookup("unicorn steak").to_string(),
            "No USDA data found for 'unicorn steak'."
        );

        let response: SearchResponse = serde_json::from_value(json!({"totalHits": 0})).unwrap();
        assert_eq!(
            response.into_lookup("kale").to_string(),
            "No USDA data found for 'kale'."
        );
    }

    #[test]
    fn test_first_hit_mapped_with_defaults() {
        let response: SearchResponse = serde_json::from_value(json!({
            "foods": [
                {
                    "description": "Rice, white, cooked",
                    "foodNutrients": [
                        {"nutrientName": "Energy", "value": 130.0, "unitName": "KCAL"},
                        {"nutrientName": "Carbohydrate, by difference", "value": 28.2},
                        {"nutrientName": "Protein", "value": 2.7},
                        {"nutrientName": "Total lipid (fat)"}
                    ]
                },
                {"description": "Rice, brown", "foodNutrients": []}
            ]
        }))
        .unwrap();

        let NutritionLookup::Found(record) = response.into_lookup("rice") else {
            panic!("expected a record");
        };
        assert_eq!(record.food.as_deref(), Some("Rice, white, cooked"));
        assert_eq!(record.calories, 130.0);
        assert_eq!(record.carbs, 28.2);
        assert_eq!(record.protein, 2.7);
        assert_eq!(record.fat, 0.0);
        assert_eq!(record.sugar, 0.0);
        assert_eq!(record.fiber, 0.0);
    }

    #[tokio::test]
    async fn test_lookup_sends_search_params() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/fdc/v1/foods/search")
                    .query_param("api_key", "usda-key")
                    .query_param("query", "brown rice")
                    .query_param("pageSize", "1");
                then.status(200).json_body(json!({
                    "foods": [{
                        "description": "Rice, brown, cooked",
                        "foodNutrients": [{"nutrientName": "Fiber, total dietary", "value": 1.8}]
                    }]
                }));
            })
            .await;

        let client = test_client(&server);
        let lookup = client.lookup("brown rice").await.unwrap();

        mock.assert_async().await;
        match lookup {
            NutritionLookup::Found(record) => assert_eq!(record.fiber, 1.8),
            other => panic!("unexpected lookup: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/fdc/v1/foods/search");
                then.status(403).body("API_KEY_INVALID");
            })
            .await;

        let client = test_client(&server);
        let err = client.lookup("bread").await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }
}
