//! # Verigate - Account Verification Service Library
//!
//! This is a facade crate that re-exports all public APIs from the account
//! service components. Use this crate to get access to registration, OTP
//! verification and credential issuance in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Username`, `Password`, `OtpCode`, `User`, etc.
//! - **Repository traits**: `UserStore`, `OtpStore`, `RevokedTokenStore`
//! - **Use cases**: `RegisterUseCase`, `VerifyAccountUseCase`, `LoginUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `RedisRevokedTokenStore`, `PostmarkEmailClient`, etc.
//! - **Service**: `AccountService` - The main entry point for the HTTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use verigate_core::*;
}

// Re-export most commonly used core types at the root level
pub use verigate_core::{
    Email, NewUser, OtpCode, OtpRecord, Password, PersonName, TokenPair, User, Username,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use verigate_core::{
        OtpStore, OtpStoreError, RevokedTokenStore, RevokedTokenStoreError, UserStore,
        UserStoreError,
    };
}

// Re-export repository and service traits at root level
pub use verigate_core::{
    EmailClient, OtpStore, OtpStoreError, RevokedTokenStore, RevokedTokenStoreError, TokenIssuer,
    TokenIssuerError, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use verigate_application::*;
}

// Re-export use cases at root level
pub use verigate_application::{
    LoginUseCase, LogoutUseCase, OtpIssuer, OtpValidator, RegisterUseCase, RequestOtpUseCase,
    VerifyAccountUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use verigate_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use verigate_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use verigate_adapters::email::*;
    }

    /// JWT issuance and validation
    pub mod tokens {
        pub use verigate_adapters::tokens::*;
    }

    /// Configuration
    pub mod config {
        pub use verigate_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use verigate_adapters::{
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{
        InMemoryOtpStore, InMemoryRevokedTokenStore, InMemoryUserStore, PostgresOtpStore,
        PostgresUserStore, RedisRevokedTokenStore,
    },
    tokens::{JwtConfig, JwtTokenIssuer},
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

/// Main account service
pub use verigate_service::{AccountService, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
