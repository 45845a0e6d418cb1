//! Transfer Handler
//!
//! The funds-transfer engine. One `execute` call runs the whole
//! request-scoped operation: eligibility, the two wallet writes, external
//! authorization, and notification, strictly in that order. The store is
//! not assumed to offer an atomic multi-record transaction, so every step
//! after the first wallet write has a compensating rollback path.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Money, OperationContext};
use crate::entity::{Transfer, TransferStatus, User};
use crate::error::{AppError, AppResult};
use crate::ports::{AccountRepository, Authorizer, IdProvider, Notifier, TransferRepository};

use super::{TransferCommand, TransferResult};

/// Default bound for whole-operation retries on wallet version conflicts.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Inverse operation applied to undo a partially-applied mutation.
enum Restore<'a> {
    Credit(&'a Money),
    Debit(&'a Money),
}

enum RestoreFailure {
    Conflict,
    Fatal,
}

/// Handler for wallet-to-wallet transfers.
pub struct TransferHandler {
    accounts: Arc<dyn AccountRepository>,
    transfers: Arc<dyn TransferRepository>,
    authorizer: Arc<dyn Authorizer>,
    notifier: Arc<dyn Notifier>,
    ids: Arc<dyn IdProvider>,
    max_retries: u32,
}

impl TransferHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        transfers: Arc<dyn TransferRepository>,
        authorizer: Arc<dyn Authorizer>,
        notifier: Arc<dyn Notifier>,
        ids: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            accounts,
            transfers,
            authorizer,
            notifier,
            ids,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Execute the transfer command.
    ///
    /// Version conflicts on the wallet writes are retried internally from
    /// the first step, up to the configured bound. Every other error
    /// except `ReconciliationRequired` leaves both wallets at their
    /// pre-call values.
    pub async fn execute(
        &self,
        command: TransferCommand,
        context: &OperationContext,
    ) -> AppResult<TransferResult> {
        // A requesting user, when present, may only move their own money.
        if let Some(request_user_id) = context.request_user_id {
            if request_user_id != command.payer_id {
                return Err(AppError::TransferNotAuthorized);
            }
        }

        let transfer_id = command.transfer_id.unwrap_or_else(|| self.ids.generate());

        // Idempotent retry: a transfer already committed under this id is
        // returned as stored, without touching any wallet. A FAILED or
        // REJECTED record permits a fresh attempt reusing the id.
        if let Some(existing) = self
            .transfers
            .find_by_id(transfer_id)
            .await
            .map_err(|e| AppError::persistence(transfer_id, e))?
        {
            if existing.status() == TransferStatus::Completed {
                tracing::info!(%transfer_id, "transfer already completed, returning stored record");
                return Ok(TransferResult {
                    transfer: existing,
                    notification_error: None,
                });
            }
        }

        let mut attempt = 0;
        loop {
            match self.attempt(transfer_id, &command, context).await {
                Err(AppError::PersistenceFailure { source, .. })
                    if source.is_version_conflict() && attempt < self.max_retries =>
                {
                    attempt += 1;
                    tracing::warn!(
                        %transfer_id,
                        attempt,
                        "concurrent wallet modification, retrying transfer"
                    );
                }
                outcome => return outcome,
            }
        }
    }

    /// One full pass over the algorithm. Steps 1-5 are pure reads and
    /// in-memory computation; the first write happens at step 6.
    async fn attempt(
        &self,
        transfer_id: Uuid,
        command: &TransferCommand,
        context: &OperationContext,
    ) -> AppResult<TransferResult> {
        if context.deadline_exceeded() {
            return Err(AppError::DeadlineExceeded);
        }

        // 1. Load payer.
        let payer = self.load_user(transfer_id, command.payer_id).await?;

        // 2. Eligibility gate, pure function of the payer role.
        if !payer.can_transfer() {
            tracing::info!(
                %transfer_id,
                payer_id = %payer.id(),
                role = %payer.role(),
                "payer role may not initiate transfers"
            );
            return Err(AppError::TransferNotAuthorized);
        }

        // 3. Load payee.
        let payee = self.load_user(transfer_id, command.payee_id).await?;

        // 4-5. Compute both sides in memory. Nothing is persisted yet, so
        // an insufficient balance or currency mismatch aborts cleanly.
        let debited_payer = payer.withdraw(&command.value)?;
        let credited_payee = payee.deposit(&command.value)?;

        if context.deadline_exceeded() {
            return Err(AppError::DeadlineExceeded);
        }

        // 6. Persist the transfer record as PENDING.
        let transfer = Transfer::new(
            transfer_id,
            payer.id(),
            payee.id(),
            command.value,
            Utc::now(),
        )?;
        let transfer = self
            .transfers
            .create(transfer)
            .await
            .map_err(|e| AppError::persistence(transfer_id, e))?;

        // 7a. Payer wallet write. On failure no visible balance has
        // changed; the record is marked FAILED and the error surfaced.
        if let Err(err) = self
            .accounts
            .update_wallet(payer.id(), *debited_payer.wallet().money(), payer.version())
            .await
        {
            self.mark(transfer_id, TransferStatus::Failed).await;
            return Err(AppError::persistence(transfer_id, err));
        }

        // 7b. Payee wallet write. Failure here is the critical
        // compensation point: the payer is already debited and must be
        // re-credited before the record is marked FAILED.
        if let Err(err) = self
            .accounts
            .update_wallet(
                payee.id(),
                *credited_payee.wallet().money(),
                payee.version(),
            )
            .await
        {
            self.restore_wallet(transfer_id, &payer, Restore::Credit(&command.value))
                .await?;
            self.mark(transfer_id, TransferStatus::Failed).await;
            return Err(AppError::persistence(transfer_id, err));
        }

        // Cancellation observed after the wallet writes still compensates;
        // it never leaves a half-applied transfer behind.
        if context.deadline_exceeded() {
            self.unwind(transfer_id, &payer, &payee, &command.value)
                .await?;
            self.mark(transfer_id, TransferStatus::Failed).await;
            return Err(AppError::DeadlineExceeded);
        }

        // 8. External authorization. Any authorizer error counts as a
        // denial; balances return to their pre-transfer values.
        let approved = match self.authorizer.authorize(&transfer).await {
            Ok(approved) => approved,
            Err(err) => {
                tracing::warn!(%transfer_id, error = %err, "authorizer unreachable, treating as denial");
                false
            }
        };
        if !approved {
            self.unwind(transfer_id, &payer, &payee, &command.value)
                .await?;
            self.mark(transfer_id, TransferStatus::Rejected).await;
            return Err(AppError::TransferNotAuthorized);
        }

        // 9. Commit. A failed COMPLETED write also compensates: every exit
        // besides ReconciliationRequired restores the pre-call balances.
        if let Err(err) = self
            .transfers
            .update_status(transfer_id, TransferStatus::Completed)
            .await
        {
            self.unwind(transfer_id, &payer, &payee, &command.value)
                .await?;
            self.mark(transfer_id, TransferStatus::Failed).await;
            return Err(AppError::persistence(transfer_id, err));
        }
        let transfer = transfer.transition(TransferStatus::Completed)?;

        // 10. Notify, best effort. The money movement is final; a delivery
        // failure is attached to the successful result and retried
        // out-of-band, idempotent on the transfer id.
        let notification_error = match self.notifier.notify(&transfer).await {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(%transfer_id, error = %err, "notification failed, caller retries out-of-band");
                Some(err.to_string())
            }
        };

        tracing::info!(
            %transfer_id,
            payer_id = %payer.id(),
            payee_id = %payee.id(),
            value = %command.value,
            correlation_id = ?context.correlation_id,
            "transfer completed"
        );

        Ok(TransferResult {
            transfer,
            notification_error,
        })
    }

    async fn load_user(&self, transfer_id: Uuid, id: Uuid) -> AppResult<User> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(|e| AppError::persistence(transfer_id, e))?
            .ok_or(AppError::UserNotFound(id))
    }

    /// Reverse both wallet writes, inverse order of application: the payee
    /// credit first, then the payer debit.
    async fn unwind(
        &self,
        transfer_id: Uuid,
        payer: &User,
        payee: &User,
        value: &Money,
    ) -> AppResult<()> {
        self.restore_wallet(transfer_id, payee, Restore::Debit(value))
            .await?;
        self.restore_wallet(transfer_id, payer, Restore::Credit(value))
            .await?;
        Ok(())
    }

    /// Apply the inverse operation to one wallet, re-reading current state
    /// so concurrent unrelated transfers are preserved. Version conflicts
    /// are retried; any other failure is the one unrecoverable condition
    /// and escalates for reconciliation.
    async fn restore_wallet(
        &self,
        transfer_id: Uuid,
        pre: &User,
        op: Restore<'_>,
    ) -> AppResult<()> {
        let owner = pre.id();
        let expected_balance = pre.wallet().balance();

        let mut attempt = 0;
        loop {
            match self.try_restore(owner, &op).await {
                Ok(()) => {
                    tracing::info!(
                        %transfer_id,
                        wallet_owner = %owner,
                        "wallet compensated after aborted transfer"
                    );
                    return Ok(());
                }
                Err(RestoreFailure::Conflict) if attempt < self.max_retries => {
                    attempt += 1;
                }
                Err(_) => {
                    let observed_balance = self.observed_balance(owner).await;
                    tracing::error!(
                        %transfer_id,
                        wallet_owner = %owner,
                        expected_balance,
                        ?observed_balance,
                        "compensation failed, escalating for reconciliation"
                    );
                    return Err(AppError::ReconciliationRequired {
                        transfer_id,
                        wallet_owner: owner,
                        expected_balance,
                        observed_balance,
                    });
                }
            }
        }
    }

    async fn try_restore(&self, owner: Uuid, op: &Restore<'_>) -> Result<(), RestoreFailure> {
        let current = self
            .accounts
            .find_by_id(owner)
            .await
            .map_err(|_| RestoreFailure::Fatal)?
            .ok_or(RestoreFailure::Fatal)?;

        let restored = match op {
            Restore::Credit(value) => current.deposit(value),
            Restore::Debit(value) => current.withdraw(value),
        }
        .map_err(|_| RestoreFailure::Fatal)?;

        match self
            .accounts
            .update_wallet(owner, *restored.wallet().money(), current.version())
            .await
        {
            Ok(()) => Ok(()),
            Err(err) if err.is_version_conflict() => Err(RestoreFailure::Conflict),
            Err(_) => Err(RestoreFailure::Fatal),
        }
    }

    async fn observed_balance(&self, owner: Uuid) -> Option<i64> {
        match self.accounts.find_by_id(owner).await {
            Ok(user) => user.map(|u| u.wallet().balance()),
            Err(_) => None,
        }
    }

    /// Record a terminal status, best effort. The wallet state is already
    /// consistent at every call site; a failed status write is logged and
    /// the primary error kept.
    async fn mark(&self, transfer_id: Uuid, status: TransferStatus) {
        if let Err(err) = self.transfers.update_status(transfer_id, status).await {
            tracing::error!(
                %transfer_id,
                %status,
                error = %err,
                "failed to record terminal transfer status"
            );
        }
    }
}
