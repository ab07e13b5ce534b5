use ferrous_lookup_application::ports::{DatagramTransport, MessageCodec};
use ferrous_lookup_application::use_cases::{LookupSessionUseCase, SessionOptions};
use ferrous_lookup_domain::Config;
use ferrous_lookup_infrastructure::codec::JsonMessageCodec;
use ferrous_lookup_infrastructure::transport::UdpDatagramTransport;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct ClientServices {
    pub session: LookupSessionUseCase,
}

impl ClientServices {
    pub async fn new(config: &Config, shutdown: CancellationToken) -> anyhow::Result<Self> {
        let server = config.settings.server_endpoint()?;
        let local = config.settings.client_endpoint()?;

        let transport = UdpDatagramTransport::bind(local).await?;
        info!(
            local = %transport.local_addr()?,
            server = %server,
            "Client socket ready"
        );

        let transport: Arc<dyn DatagramTransport> = Arc::new(transport);
        let codec: Arc<dyn MessageCodec> = Arc::new(JsonMessageCodec::new());
        let options = SessionOptions {
            receive_timeout: config.client.receive_timeout(),
            send_end: config.client.send_end,
            ..SessionOptions::default()
        };

        let session =
            LookupSessionUseCase::new(transport, codec, server, options).with_cancellation(shutdown);

        Ok(Self { session })
    }
}
