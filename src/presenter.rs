//! Presenters
//!
//! Pure, side-effect-free output shaping for transfers and users. Invoked
//! by the caller of the handlers, never by the transfer engine itself.

use serde::Serialize;

use crate::entity::{Transfer, User};

/// Serializable view of a transfer record.
#[derive(Debug, Clone, Serialize)]
pub struct TransferOutput {
    pub id: String,
    pub payer: String,
    pub payee: String,
    pub value: i64,
    pub currency: String,
    pub created_at: String,
    pub status: String,
}

/// Serializable view of a user's document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutput {
    pub kind: String,
    pub number: String,
}

/// Serializable view of a user's wallet.
#[derive(Debug, Clone, Serialize)]
pub struct WalletOutput {
    pub currency: String,
    pub amount: i64,
}

/// Serializable view of a user. The password secret is never presented.
#[derive(Debug, Clone, Serialize)]
pub struct UserOutput {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub document: DocumentOutput,
    pub wallet: WalletOutput,
    pub role: String,
    pub created_at: String,
}

pub fn present_transfer(transfer: &Transfer) -> TransferOutput {
    TransferOutput {
        id: transfer.id().to_string(),
        payer: transfer.payer_id().to_string(),
        payee: transfer.payee_id().to_string(),
        value: transfer.value().amount(),
        currency: transfer.value().currency().to_string(),
        created_at: transfer.created_at().to_rfc3339(),
        status: transfer.status().to_string(),
    }
}

pub fn present_user(user: &User) -> UserOutput {
    UserOutput {
        id: user.id().to_string(),
        full_name: user.full_name().value().to_string(),
        email: user.email().value().to_string(),
        document: DocumentOutput {
            kind: user.document().kind().to_string(),
            number: user.document().number().to_string(),
        },
        wallet: WalletOutput {
            currency: user.wallet().money().currency().to_string(),
            amount: user.wallet().balance(),
        },
        role: user.role().to_string(),
        created_at: user.created_at().to_rfc3339(),
    }
}
