//! Prompt construction for the explanation service.

use serde::Serialize;

use crate::circuit::{CircuitConfiguration, ConnectionType};

/// Persona given to the model for every request.
pub const SYSTEM_INSTRUCTION: &str = "당신은 아이들을 좋아하는 친절한 초등학교 과학 선생님입니다. \
어려운 물리 용어 대신 쉬운 비유를 사용하여 설명해주세요. \
답변은 3~4문장으로 간결하고 명확하게, 격려하는 어조로 해주세요.";

/// A fully prepared request, independent of any transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Display name of a connection in the prompt's language.
pub fn connection_name(connection: ConnectionType) -> &'static str {
    match connection {
        ConnectionType::Series => "직렬(Series)",
        ConnectionType::Parallel => "병렬(Parallel)",
    }
}

/// Build the request describing a configuration.
pub fn build_prompt(config: &CircuitConfiguration, temperature: f32) -> PromptRequest {
    let prompt = format!(
        "현재 회로 상태:\n\
         - 전지 개수: {count}개\n\
         - 연결 방식: {connection} 연결\n\
         \n\
         이 실험 조건에서 전구의 밝기가 어떻게 나타나는지(예: 기준보다 밝음, 어두움, 같음 등), \
         그리고 왜 그런지 설명해주세요.\n\
         직렬 연결은 전지가 힘을 합쳐 전압이 높아지는 원리, 병렬 연결은 전압은 같지만 전지가 오래가는 원리 등을 \
         물이 흐르는 수도관이나 힘을 합치는 줄다리기 등의 쉬운 비유를 들어 설명해주세요.",
        count = config.battery_count(),
        connection = connection_name(config.connection()),
    );

    PromptRequest {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        prompt,
        temperature,
    }
}
