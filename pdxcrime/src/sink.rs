//! Destination des erreurs de conversion ligne par ligne
//!
//! Chaque ligne rejetée est signalée au sink du convertisseur avant que
//! l'erreur ne soit propagée.

use std::sync::Mutex;

use tracing::error;

use crate::error::ConversionError;

/// Reçoit les lignes rejetées
pub trait ErrorSink {
    fn row_failed(&self, error: &ConversionError);
}

/// Sink par défaut : log `error` via `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn row_failed(&self, e: &ConversionError) {
        error!(record = %e.record, "{}", e.source);
    }
}

/// Sink qui conserve les erreurs en mémoire
#[derive(Debug, Default)]
pub struct CollectingSink {
    errors: Mutex<Vec<ConversionError>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nombre d'erreurs reçues
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Récupère les erreurs reçues, dans l'ordre d'arrivée
    pub fn take(&self) -> Vec<ConversionError> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ConversionError>> {
        // Un panic pendant un push ne laisse pas le Vec incohérent
        self.errors.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ErrorSink for CollectingSink {
    fn row_failed(&self, error: &ConversionError) {
        self.lock().push(error.clone());
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for &S {
    fn row_failed(&self, error: &ConversionError) {
        (**self).row_failed(error);
    }
}

/// Transmet chaque erreur à deux sinks
#[derive(Debug, Default, Clone, Copy)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: ErrorSink, B: ErrorSink> ErrorSink for Tee<A, B> {
    fn row_failed(&self, error: &ConversionError) {
        self.0.row_failed(error);
        self.1.row_failed(error);
    }
}
