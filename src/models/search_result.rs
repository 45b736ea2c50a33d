// file: src/models/search_result.rs
// description: Search upstream wire types and the reshaped result record
// reference: https://cloud.google.com/generative-ai-app-builder/docs/reference/rest/v1alpha/projects.locations.collections.engines.servingConfigs/search

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamSearchRequest<'a> {
    pub query: &'a str,
    pub page_size: usize,
    pub query_expansion_spec: QueryExpansionSpec,
    pub spell_correction_spec: SpellCorrectionSpec,
}

#[derive(Debug, Serialize)]
pub struct QueryExpansionSpec {
    pub condition: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SpellCorrectionSpec {
    pub mode: &'static str,
}

impl<'a> UpstreamSearchRequest<'a> {
    pub fn new(query: &'a str, page_size: usize) -> Self {
        Self {
            query,
            page_size,
            query_expansion_spec: QueryExpansionSpec { condition: "AUTO" },
            spell_correction_spec: SpellCorrectionSpec { mode: "AUTO" },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamSearchResponse {
    /// Absent and `null` both mean no hits.
    #[serde(default)]
    pub results: Option<Vec<UpstreamSearchResult>>,
}

impl UpstreamSearchResponse {
    pub fn into_results(self) -> Vec<UpstreamSearchResult> {
        self.results.unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamSearchResult {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub document: Option<UpstreamDocument>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamDocument {
    #[serde(default)]
    pub struct_data: Option<Map<String, Value>>,
}

/// One reshaped search hit. Every field is optional and serializes as `null`
/// when absent upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultRecord {
    pub id: Option<Value>,
    pub categoria: Option<Value>,
    pub description: Option<Value>,
    pub solucion: Option<Value>,
    pub cliente_id: Option<Value>,
}

impl From<UpstreamSearchResult> for SearchResultRecord {
    fn from(result: UpstreamSearchResult) -> Self {
        let mut data = result
            .document
            .and_then(|document| document.struct_data)
            .unwrap_or_default();

        // structData is schemaless; an explicit JSON null counts as absent
        let mut take = |key: &str| data.remove(key).filter(|value| !value.is_null());

        Self {
            id: result.id.filter(|value| !value.is_null()),
            categoria: take("categoria"),
            description: take("description"),
            solucion: take("solucion"),
            cliente_id: take("cliente_id"),
        }
    }
}
