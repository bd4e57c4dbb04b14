/// Returns the capabilities of the server.
pub(crate) fn get() -> lsp_types::ServerCapabilities {
  lsp_types::ServerCapabilities {
    text_document_sync: Some(lsp_types::TextDocumentSyncCapability::Options(
      lsp_types::TextDocumentSyncOptions {
        open_close: Some(true),
        change: Some(lsp_types::TextDocumentSyncKind::INCREMENTAL),
        will_save: None,
        will_save_wait_until: None,
        save: Some(lsp_types::TextDocumentSyncSaveOptions::SaveOptions(lsp_types::SaveOptions {
          include_text: None,
        })),
      },
    )),
    hover_provider: Some(lsp_types::HoverProviderCapability::Simple(true)),
    definition_provider: Some(lsp_types::OneOf::Left(true)),
    document_symbol_provider: Some(lsp_types::OneOf::Left(true)),
    workspace_symbol_provider: Some(lsp_types::OneOf::Left(true)),
    rename_provider: Some(lsp_types::OneOf::Left(true)),
    references_provider: Some(lsp_types::OneOf::Left(true)),
    completion_provider: Some(lsp_types::CompletionOptions {
      resolve_provider: Some(true),
      trigger_characters: Some(vec![".".to_owned()]),
      ..Default::default()
    }),
    signature_help_provider: Some(lsp_types::SignatureHelpOptions {
      trigger_characters: Some(vec!["(".to_owned(), ",".to_owned()]),
      retrigger_characters: None,
      work_done_progress_options: lsp_types::WorkDoneProgressOptions::default(),
    }),
    code_action_provider: Some(lsp_types::CodeActionProviderCapability::Simple(true)),
    ..Default::default()
  }
}
