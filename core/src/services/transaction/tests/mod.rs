//! Tests for the transaction coordinator and purchase registry
