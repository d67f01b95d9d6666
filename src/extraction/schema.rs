use serde_json::{json, Value};

pub const EXTRACTION_PROMPT: &str = "\
Analiza este pedimento aduanal y extrae el encabezado y todas sus partidas.
1. Tabla \"IDENTIFICADORES A NIVEL PEDIMENTO\": registra la clave y los complementos 1, 2 y 3.
   Los identificadores V1 e IM son críticos. Si solo hay clave y complemento 1, deja vacíos los demás.
2. Encabezado: aduana, patente, número de pedimento, número de partidas, peso bruto,
   valor en dólares y bultos.
3. Partidas: número de partida, fracción, NICO, UMC, cantidad UMC, UMT, cantidad UMT,
   peso bruto, valor en dólares, bultos, identificadores y observaciones completas.
Si el documento es una proforma PDF o un archivo de validación (.VAL), interpreta sus registros
según corresponda. Usa \"Consolidated\" como tipo cuando el pedimento sea consolidado.";

fn identifier_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "key": { "type": "STRING" },
            "complement1": { "type": "STRING" },
            "complement2": { "type": "STRING" },
            "complement3": { "type": "STRING" }
        },
        "required": ["key"]
    })
}

fn line_item_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "itemNumber": { "type": "INTEGER" },
            "classificationCode": { "type": "STRING" },
            "subCode": { "type": "STRING" },
            "declaredUnitCode": { "type": "STRING" },
            "declaredQuantity": { "type": "NUMBER" },
            "tradeUnitCode": { "type": "STRING" },
            "tradeQuantity": { "type": "NUMBER" },
            "grossWeight": { "type": "NUMBER" },
            "valueUSD": { "type": "NUMBER" },
            "packageCount": { "type": "NUMBER" },
            "identifiers": { "type": "ARRAY", "items": identifier_schema() },
            "notes": { "type": "STRING" }
        },
        "required": ["classificationCode", "subCode", "declaredQuantity", "valueUSD"]
    })
}

/// Response schema handed to the provider; mirrors `DocumentRecord`
pub fn document_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "documentType": { "type": "STRING", "enum": ["General", "Consolidated"] },
            "customsOffice": { "type": "STRING" },
            "licenseNumber": { "type": "STRING" },
            "referenceNumber": { "type": "STRING" },
            "declaredItemCount": { "type": "INTEGER" },
            "grossWeight": { "type": "NUMBER" },
            "valueUSD": { "type": "NUMBER" },
            "packageCount": { "type": "NUMBER" },
            "identifiers": { "type": "ARRAY", "items": identifier_schema() },
            "lineItems": { "type": "ARRAY", "items": line_item_schema() }
        },
        "required": ["customsOffice", "licenseNumber", "referenceNumber", "lineItems"]
    })
}
