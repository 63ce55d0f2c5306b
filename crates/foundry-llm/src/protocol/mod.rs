//! Wire format types for the Azure `OpenAI` v1 API
//!
//! Pure serde structs used only at the transport boundary.

pub mod openai;
