//! Tests for reservation service
