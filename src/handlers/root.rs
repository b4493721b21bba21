//! API catalog served at `/`

use axum::Json;
use serde_json::{Value, json};

/// GET / — welcome message, endpoint catalog and contact links
pub async fn handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Caroline Sarkki's Portfolio API",
        "description": "This API provides information about Caroline Sarkki, a full stack software engineer with 3+ years of experience at KQED.",
        "endpoints": {
            "/query": {
                "method": "POST",
                "description": "Send a query about Caroline Sarkki's background, experience, or projects",
                "request_body": {
                    "query": "string - Your question about Caroline's experience, projects, or background"
                }
            },
            "/health": {
                "method": "GET",
                "description": "Health check endpoint"
            }
        },
        "contact": {
            "linkedin": "https://www.linkedin.com/in/caroline-sarkki-2a5517126/",
            "portfolio": "https://chocoloco123.github.io/index.html",
            "github": "https://github.com/Chocoloco123",
            "email": "csarkki.swe@gmail.com"
        }
    }))
}
