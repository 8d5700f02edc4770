//! Admin writes: the creation form and delete requests.
//!
//! Nothing here touches the [`ListingStore`](crate::store::ListingStore). A successful write
//! only tells the caller to reload, so the list never shows anything the server has not
//! confirmed.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{
    Error, Result,
    api::Backend,
    model::{Game, NewTranslation, TranslationId},
    notify::{self, Notification},
    session::Credentials,
};

/// Field values of the creation form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CreateForm {
    pub game: Game,
    pub mod_name: String,
    pub author: String,
    pub version: String,
    pub download_url: String,
}

impl CreateForm {
    /// Reset every field to its default value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_new_translation(&self) -> NewTranslation {
        NewTranslation {
            game: self.game,
            mod_name: self.mod_name.trim().to_string(),
            author: self.author.trim().to_string(),
            version: self.version.trim().to_string(),
            download_url: self.download_url.trim().to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    /// Reason shown next to the form, in the same words as the failure toast
    Failed(String),
}

#[derive(Debug, Default)]
pub struct SubmissionGateway {
    form: CreateForm,
    state: SubmitState,
    pending_deletes: HashSet<TranslationId>,
}

impl SubmissionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CreateForm {
        &mut self.form
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    pub fn is_deleting(&self, id: &TranslationId) -> bool {
        self.pending_deletes.contains(id)
    }

    /// Start submitting the form. Refused while a submission is already in flight or when the
    /// form does not validate; the form keeps its contents either way.
    pub fn begin_create(&mut self) -> Result<NewTranslation> {
        if self.is_submitting() {
            return Err(Error::AlreadyInFlight);
        }

        let translation = self.form.to_new_translation();
        if let Err(e) = translation.validate() {
            let err = Error::from(e);
            self.state = SubmitState::Failed(failure_reason(&err));
            return Err(err);
        }

        self.state = SubmitState::Submitting;

        Ok(translation)
    }

    /// Apply the server's answer to the pending submission. On success the form is reset and
    /// the caller must reload the listing; on failure the form is left for a retry.
    pub fn finish_create(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => {
                debug!("Translation submitted");
                self.form.clear();
                self.state = SubmitState::Succeeded;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to submit translation: {e}");
                self.state = SubmitState::Failed(failure_reason(&e));
                Err(e)
            }
        }
    }

    /// Mark `id` as being deleted. Refused while a delete of the same id is in flight.
    pub fn begin_delete(&mut self, id: &TranslationId) -> Result<()> {
        if !self.pending_deletes.insert(id.clone()) {
            return Err(Error::AlreadyInFlight);
        }

        Ok(())
    }

    /// Apply the server's answer to deleting `id`. On success the caller must reload.
    pub fn finish_delete(&mut self, id: &TranslationId, result: Result<()>) -> Result<()> {
        self.pending_deletes.remove(id);

        match result {
            Ok(()) => {
                debug!("Translation {id} deleted");
                Ok(())
            }
            Err(e) => {
                warn!("Failed to delete translation {id}: {e}");
                Err(e)
            }
        }
    }

    /// Submit the form through `backend`.
    pub async fn create<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        credentials: &Credentials,
    ) -> Result<()> {
        let translation = self.begin_create()?;
        let result = backend.create(credentials, &translation).await;
        self.finish_create(result)
    }

    /// Delete `id` through `backend`.
    pub async fn delete<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        credentials: &Credentials,
        id: &TranslationId,
    ) -> Result<()> {
        self.begin_delete(id)?;
        let result = backend.delete(credentials, id).await;
        self.finish_delete(id, result)
    }
}

fn failure_reason(err: &Error) -> String {
    Notification::failed(notify::Action::Create, err).body
}
