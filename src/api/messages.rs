//! Outgoing message endpoints.

use crate::client::EvolutionClient;
use crate::constants::routes;
use crate::error::Result;
use crate::request::{FormData, RequestOptions};
use crate::types::messages::{MediaUpload, SendContactRequest, SentMessage};

impl EvolutionClient {
    /// Share one or more contact cards.
    ///
    /// **Endpoint:** `POST /message/sendContact/{instance}`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use evolution_rs::EvolutionClient;
    /// # use evolution_rs::types::messages::{ContactCard, SendContactRequest};
    /// # #[tokio::main]
    /// # async fn main() -> evolution_rs::Result<()> {
    /// let client = EvolutionClient::new("http://localhost:8080", "global-api-key")?
    ///     .with_instance("support-line");
    /// let req = SendContactRequest {
    ///     number: "5511999999999".into(),
    ///     contact: vec![ContactCard::new("Help Desk", "+55 11 4000-1234")],
    ///     options: Default::default(),
    /// };
    /// let sent = client.send_contact(&req, None).await?;
    /// println!("sent {}", sent.key.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_contact(
        &self,
        req: &SendContactRequest,
        instance: Option<&str>,
    ) -> Result<SentMessage> {
        self.post(
            routes::messages::SEND_CONTACT,
            RequestOptions::new().maybe_instance(instance).json(req)?,
        )
        .await
    }

    /// Upload and send a media file as multipart form data.
    ///
    /// **Endpoint:** `POST /message/sendMedia/{instance}`
    pub async fn send_media_file(
        &self,
        upload: MediaUpload,
        instance: Option<&str>,
    ) -> Result<SentMessage> {
        let mut form = FormData::new()
            .text("number", upload.number)
            .text("mediatype", upload.media_type.as_str())
            .text("mimetype", upload.mime_type.clone())
            .text("fileName", upload.file_name.clone());
        if let Some(caption) = upload.caption {
            form = form.text("caption", caption);
        }
        if let Some(delay) = upload.delay {
            form = form.text("delay", delay.to_string());
        }
        form = form.file("file", upload.file_name, upload.mime_type, upload.data);

        self.post(
            routes::messages::SEND_MEDIA,
            RequestOptions::new().maybe_instance(instance).form(form),
        )
        .await
    }
}
