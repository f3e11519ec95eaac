//! # Calldata Encoding
//!
//! Validation order for a submission: empty title, empty type, empty signer
//! list, empty hash, field lengths (under `Reject`), then signer addresses in
//! list order. The first failure wins.

use shared_types::{
    encode_short_string, parse_address, truncate_short_string, Calldata, DocumentSubmission, Felt,
    SHORT_STRING_MAX_BYTES,
};
use tracing::trace;

use crate::config::{EncoderConfig, FieldPolicy};
use crate::domain::{EncodeError, SubmissionField};

/// Encoder bound to a configuration.
#[derive(Clone, Debug, Default)]
pub struct TransactionEncoder {
    config: EncoderConfig,
}

impl TransactionEncoder {
    /// Create an encoder.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// See [`encode_submission`].
    pub fn encode_submission(&self, submission: &DocumentSubmission) -> Result<Calldata, EncodeError> {
        encode_submission(submission, &self.config)
    }

    /// See [`encode_sign_action`].
    pub fn encode_sign_action(&self, doc_id: &str) -> Result<Calldata, EncodeError> {
        encode_sign_action(doc_id)
    }
}

/// Encode a submission as `send_document` calldata.
pub fn encode_submission(
    submission: &DocumentSubmission,
    config: &EncoderConfig,
) -> Result<Calldata, EncodeError> {
    require_non_empty(&submission.title, SubmissionField::Title)?;
    require_non_empty(&submission.doc_type_id, SubmissionField::DocType)?;
    if submission.signer_addresses.is_empty() {
        return Err(EncodeError::NoSigners);
    }
    require_non_empty(&submission.content_hash, SubmissionField::ContentHash)?;

    let title = short_string_field(&submission.title, SubmissionField::Title, config.field_policy)?;
    let doc_type = short_string_field(
        &submission.doc_type_id,
        SubmissionField::DocType,
        config.field_policy,
    )?;
    let content_hash = short_string_field(
        &submission.content_hash,
        SubmissionField::ContentHash,
        config.field_policy,
    )?;

    let signers = submission
        .signer_addresses
        .iter()
        .enumerate()
        .map(|(index, address)| {
            parse_address(address)
                .map(|parsed| parsed.felt())
                .map_err(|source| EncodeError::InvalidSignerAddress {
                    index,
                    address: address.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<Felt>, _>>()?;

    let mut calldata = Vec::with_capacity(4 + signers.len());
    calldata.push(title);
    calldata.push(doc_type);
    calldata.push(Felt::from(signers.len()));
    calldata.extend(signers);
    calldata.push(content_hash);

    trace!(len = calldata.len(), "[cs-02] Encoded submission");
    Ok(calldata)
}

/// Encode a document id (decimal or `0x` hex) as single-element calldata.
pub fn encode_sign_action(doc_id: &str) -> Result<Calldata, EncodeError> {
    let felt = Felt::parse(doc_id).map_err(|reason| EncodeError::InvalidDocId {
        id: doc_id.to_string(),
        reason,
    })?;
    Ok(vec![felt])
}

fn require_non_empty(value: &str, field: SubmissionField) -> Result<(), EncodeError> {
    if value.trim().is_empty() {
        Err(EncodeError::EmptyField(field))
    } else {
        Ok(())
    }
}

fn short_string_field(
    value: &str,
    field: SubmissionField,
    policy: FieldPolicy,
) -> Result<Felt, EncodeError> {
    let fitted = match policy {
        FieldPolicy::Truncate => truncate_short_string(value),
        FieldPolicy::Reject if value.len() > SHORT_STRING_MAX_BYTES => {
            return Err(EncodeError::FieldTooLong {
                field,
                len: value.len(),
                max: SHORT_STRING_MAX_BYTES,
            });
        }
        FieldPolicy::Reject => value,
    };
    // `fitted` is at most 31 bytes here, so packing cannot fail.
    encode_short_string(fitted).map_err(|_| EncodeError::FieldTooLong {
        field,
        len: value.len(),
        max: SHORT_STRING_MAX_BYTES,
    })
}
