//! Watson Language Translator v3 client.

use std::sync::Arc;

use serde::Deserialize;

use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::core::request::require;
use crate::core::transport::HttpTransport;
use crate::core::{DetailedResponse, Method, Operation, OperationExecutor};
use crate::error::{WatsonError, WatsonResult};

const TRANSLATE: Operation = Operation::new("translate", Method::Post, "/v3/translate");
const IDENTIFY: Operation = Operation::new("identify", Method::Post, "/v3/identify");
const LIST_MODELS: Operation = Operation::new("list_models", Method::Get, "/v3/models");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub translation: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationResult {
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub character_count: u64,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentifiedLanguage {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentifiedLanguages {
    #[serde(default)]
    pub languages: Vec<IdentifiedLanguage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationModel {
    #[serde(default)]
    pub model_id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationModels {
    #[serde(default)]
    pub models: Vec<TranslationModel>,
}

pub struct LanguageTranslatorClient {
    executor: OperationExecutor,
}

impl LanguageTranslatorClient {
    pub fn new(config: ServiceConfig, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            executor: OperationExecutor::new(config, authenticator),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.executor = self.executor.with_transport(transport);
        self
    }

    /// Translate one or more texts. The model is selected either by
    /// `model_id` or by a `source`/`target` language pair; supplying
    /// neither is an `InvalidArgument`.
    pub async fn translate(
        &self,
        text: &[&str],
        model_id: Option<&str>,
        source: Option<&str>,
        target: Option<&str>,
    ) -> WatsonResult<DetailedResponse<TranslationResult>> {
        if text.is_empty() || text.iter().all(|t| t.trim().is_empty()) {
            return Err(WatsonError::missing_param("text"));
        }
        if model_id.is_none() && (source.is_none() || target.is_none()) {
            return Err(WatsonError::InvalidArgument(
                "either `model_id` or both `source` and `target` must be supplied".to_string(),
            ));
        }
        let mut body = serde_json::Map::new();
        body.insert("text".to_string(), serde_json::Value::from(text.to_vec()));
        if let Some(model_id) = model_id {
            body.insert("model_id".to_string(), serde_json::Value::from(model_id));
        }
        if let Some(source) = source {
            body.insert("source".to_string(), serde_json::Value::from(source));
        }
        if let Some(target) = target {
            body.insert("target".to_string(), serde_json::Value::from(target));
        }
        let request = self
            .executor
            .request(TRANSLATE)
            .json_body(serde_json::Value::Object(body))
            .build()?;
        self.executor.execute_json(request).await
    }

    /// Identify the language of `text`. The body is plain text, not JSON.
    pub async fn identify(
        &self,
        text: &str,
    ) -> WatsonResult<DetailedResponse<IdentifiedLanguages>> {
        require("text", text)?;
        let request = self
            .executor
            .request(IDENTIFY)
            .bytes_body(text.as_bytes().to_vec(), "text/plain")
            .build()?;
        self.executor.execute_json(request).await
    }

    pub async fn list_models(
        &self,
        source: Option<&str>,
        target: Option<&str>,
    ) -> WatsonResult<DetailedResponse<TranslationModels>> {
        let request = self
            .executor
            .request(LIST_MODELS)
            .query_param_opt("source", source)
            .query_param_opt("target", target)
            .build()?;
        self.executor.execute_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_result_shape() {
        let result: TranslationResult = serde_json::from_str(
            r#"{"word_count":2,"character_count":10,"translations":[{"translation":"hola"}]}"#,
        )
        .unwrap();
        assert_eq!(result.translations[0].translation, "hola");
        assert_eq!(result.word_count, 2);
    }
}
