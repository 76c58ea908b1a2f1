//! Blockchain operations
//!
//! Closed sum type over the operation kinds this wallet can place in a
//! transaction. Each variant carries a fixed field set, knows its numeric
//! wire id, validates itself before entering a transaction, and writes
//! its canonical byte encoding.

use crate::chain::asset::{Asset, Symbol};
use crate::chain::encoding::ByteWriter;
use serde::{Deserialize, Serialize};

/// Local validation failures detected before transmission
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum OperationError {
    #[error("Invalid account name '{0}'")]
    InvalidAccountName(String),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(String),

    #[error("Unexpected symbol {got} for field '{field}' (expected {expected})")]
    WrongSymbol {
        field: &'static str,
        got: Symbol,
        expected: &'static str,
    },

    #[error("Vote weight {0} outside [-10000, 10000]")]
    WeightOutOfRange(i16),

    #[error("Invalid custom_json payload: {0}")]
    InvalidJson(String),

    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteOperation {
    pub voter: String,
    pub author: String,
    pub permlink: String,
    pub weight: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferOperation {
    pub from: String,
    pub to: String,
    pub amount: Asset,
    pub memo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferToVestingOperation {
    pub from: String,
    pub to: String,
    pub amount: Asset,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WithdrawVestingOperation {
    pub account: String,
    pub vesting_shares: Asset,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountWitnessVoteOperation {
    pub account: String,
    pub witness: String,
    pub approve: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomJsonOperation {
    pub required_auths: Vec<String>,
    pub required_posting_auths: Vec<String>,
    pub id: String,
    pub json: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferToSavingsOperation {
    pub from: String,
    pub to: String,
    pub amount: Asset,
    pub memo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaimRewardBalanceOperation {
    pub account: String,
    pub reward_hive: Asset,
    pub reward_hbd: Asset,
    pub reward_vests: Asset,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DelegateVestingSharesOperation {
    pub delegator: String,
    pub delegatee: String,
    pub vesting_shares: Asset,
}

/// One blockchain action, tagged the way the node's JSON interface
/// expects (`{"type": "transfer_operation", "value": {...}}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value")]
pub enum Operation {
    #[serde(rename = "vote_operation")]
    Vote(VoteOperation),

    #[serde(rename = "transfer_operation")]
    Transfer(TransferOperation),

    #[serde(rename = "transfer_to_vesting_operation")]
    TransferToVesting(TransferToVestingOperation),

    #[serde(rename = "withdraw_vesting_operation")]
    WithdrawVesting(WithdrawVestingOperation),

    #[serde(rename = "account_witness_vote_operation")]
    AccountWitnessVote(AccountWitnessVoteOperation),

    #[serde(rename = "custom_json_operation")]
    CustomJson(CustomJsonOperation),

    #[serde(rename = "transfer_to_savings_operation")]
    TransferToSavings(TransferToSavingsOperation),

    #[serde(rename = "claim_reward_balance_operation")]
    ClaimRewardBalance(ClaimRewardBalanceOperation),

    #[serde(rename = "delegate_vesting_shares_operation")]
    DelegateVestingShares(DelegateVestingSharesOperation),
}

impl Operation {
    /// Numeric id used by the canonical wire encoding
    pub fn wire_id(&self) -> u64 {
        match self {
            Operation::Vote(_) => 0,
            Operation::Transfer(_) => 2,
            Operation::TransferToVesting(_) => 3,
            Operation::WithdrawVesting(_) => 4,
            Operation::AccountWitnessVote(_) => 12,
            Operation::CustomJson(_) => 18,
            Operation::TransferToSavings(_) => 32,
            Operation::ClaimRewardBalance(_) => 39,
            Operation::DelegateVestingShares(_) => 40,
        }
    }

    /// Operation name as it appears on the wire, without the
    /// `_operation` suffix
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Vote(_) => "vote",
            Operation::Transfer(_) => "transfer",
            Operation::TransferToVesting(_) => "transfer_to_vesting",
            Operation::WithdrawVesting(_) => "withdraw_vesting",
            Operation::AccountWitnessVote(_) => "account_witness_vote",
            Operation::CustomJson(_) => "custom_json",
            Operation::TransferToSavings(_) => "transfer_to_savings",
            Operation::ClaimRewardBalance(_) => "claim_reward_balance",
            Operation::DelegateVestingShares(_) => "delegate_vesting_shares",
        }
    }

    /// Validate field contents before the operation enters a transaction
    pub fn validate(&self) -> Result<(), OperationError> {
        match self {
            Operation::Vote(op) => {
                validate_account_name(&op.voter)?;
                validate_account_name(&op.author)?;
                if op.permlink.is_empty() {
                    return Err(OperationError::EmptyField("permlink"));
                }
                if !(-10_000..=10_000).contains(&op.weight) {
                    return Err(OperationError::WeightOutOfRange(op.weight));
                }
                Ok(())
            }
            Operation::Transfer(op) => {
                validate_account_name(&op.from)?;
                validate_account_name(&op.to)?;
                require_positive(&op.amount)?;
                require_liquid("amount", &op.amount)
            }
            Operation::TransferToVesting(op) => {
                validate_account_name(&op.from)?;
                validate_account_name(&op.to)?;
                require_positive(&op.amount)?;
                require_symbol("amount", &op.amount, Symbol::Hive)
            }
            Operation::WithdrawVesting(op) => {
                validate_account_name(&op.account)?;
                require_symbol("vesting_shares", &op.vesting_shares, Symbol::Vests)
            }
            Operation::AccountWitnessVote(op) => {
                validate_account_name(&op.account)?;
                validate_account_name(&op.witness)
            }
            Operation::CustomJson(op) => {
                for auth in op.required_auths.iter().chain(&op.required_posting_auths) {
                    validate_account_name(auth)?;
                }
                if op.id.is_empty() {
                    return Err(OperationError::EmptyField("id"));
                }
                serde_json::from_str::<serde_json::Value>(&op.json)
                    .map_err(|e| OperationError::InvalidJson(e.to_string()))?;
                Ok(())
            }
            Operation::TransferToSavings(op) => {
                validate_account_name(&op.from)?;
                validate_account_name(&op.to)?;
                require_positive(&op.amount)?;
                require_liquid("amount", &op.amount)
            }
            Operation::ClaimRewardBalance(op) => {
                validate_account_name(&op.account)?;
                require_symbol("reward_hive", &op.reward_hive, Symbol::Hive)?;
                require_symbol("reward_hbd", &op.reward_hbd, Symbol::Hbd)?;
                require_symbol("reward_vests", &op.reward_vests, Symbol::Vests)
            }
            Operation::DelegateVestingShares(op) => {
                validate_account_name(&op.delegator)?;
                validate_account_name(&op.delegatee)?;
                require_symbol("vesting_shares", &op.vesting_shares, Symbol::Vests)
            }
        }
    }

    /// Write the canonical byte encoding: varint wire id, then each
    /// field in declaration order
    pub fn write_canonical(&self, writer: &mut ByteWriter) {
        writer.write_varint(self.wire_id());
        match self {
            Operation::Vote(op) => {
                writer.write_string(&op.voter);
                writer.write_string(&op.author);
                writer.write_string(&op.permlink);
                writer.write_i16(op.weight);
            }
            Operation::Transfer(op) => {
                writer.write_string(&op.from);
                writer.write_string(&op.to);
                writer.write_asset(&op.amount);
                writer.write_string(&op.memo);
            }
            Operation::TransferToVesting(op) => {
                writer.write_string(&op.from);
                writer.write_string(&op.to);
                writer.write_asset(&op.amount);
            }
            Operation::WithdrawVesting(op) => {
                writer.write_string(&op.account);
                writer.write_asset(&op.vesting_shares);
            }
            Operation::AccountWitnessVote(op) => {
                writer.write_string(&op.account);
                writer.write_string(&op.witness);
                writer.write_bool(op.approve);
            }
            Operation::CustomJson(op) => {
                writer.write_list(&op.required_auths, |w, a| w.write_string(a));
                writer.write_list(&op.required_posting_auths, |w, a| w.write_string(a));
                writer.write_string(&op.id);
                writer.write_string(&op.json);
            }
            Operation::TransferToSavings(op) => {
                writer.write_string(&op.from);
                writer.write_string(&op.to);
                writer.write_asset(&op.amount);
                writer.write_string(&op.memo);
            }
            Operation::ClaimRewardBalance(op) => {
                writer.write_string(&op.account);
                writer.write_asset(&op.reward_hive);
                writer.write_asset(&op.reward_hbd);
                writer.write_asset(&op.reward_vests);
            }
            Operation::DelegateVestingShares(op) => {
                writer.write_string(&op.delegator);
                writer.write_string(&op.delegatee);
                writer.write_asset(&op.vesting_shares);
            }
        }
    }
}

/// Account names: 3-16 characters, lowercase letters, digits, dashes
/// and dots; each dot-separated segment starts with a letter.
pub fn validate_account_name(name: &str) -> Result<(), OperationError> {
    if name.len() < 3 || name.len() > 16 {
        return Err(OperationError::InvalidAccountName(name.to_string()));
    }
    for segment in name.split('.') {
        let mut chars = segment.chars();
        let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_lowercase());
        let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        let valid_end = !segment.ends_with('-');
        if !valid_start || !valid_rest || !valid_end {
            return Err(OperationError::InvalidAccountName(name.to_string()));
        }
    }
    Ok(())
}

fn require_positive(amount: &Asset) -> Result<(), OperationError> {
    if !amount.is_positive() {
        return Err(OperationError::NonPositiveAmount(amount.to_string()));
    }
    Ok(())
}

fn require_symbol(field: &'static str, amount: &Asset, expected: Symbol) -> Result<(), OperationError> {
    if amount.symbol() != expected {
        return Err(OperationError::WrongSymbol {
            field,
            got: amount.symbol(),
            expected: expected.ticker(),
        });
    }
    Ok(())
}

/// Liquid transfers move HIVE or HBD, never VESTS
fn require_liquid(field: &'static str, amount: &Asset) -> Result<(), OperationError> {
    if amount.symbol() == Symbol::Vests {
        return Err(OperationError::WrongSymbol {
            field,
            got: amount.symbol(),
            expected: "HIVE or HBD",
        });
    }
    Ok(())
}
