use chrono::Utc;
use fluxo_db::models::BotConfig;

/// System instruction for the in-app CRM assistant.
pub fn crm_instruction() -> String {
    let today = Utc::now().format("%d/%m/%Y");
    format!(
        "Você é um assistente de CRM inteligente.\n\
         Data de hoje: {today}.\n\
         \n\
         SUAS FERRAMENTAS:\n\
         1. 'navigate': Use para ir para telas (dashboard, contacts, expenses, opportunities).\n\
         2. 'create_expense': Use quando o usuário disser \"gastei\", \"paguei\", \"comprei\", \"despesa de X\".\n\
         3. 'create_income': Use quando o usuário disser \"recebi\", \"ganhei\", \"vendi\", \"faturei\", \"entrada de X\".\n\
         \n\
         REGRAS:\n\
         - Se o usuário falar valores monetários, tente extrair o número e a descrição.\n\
         - Responda de forma curta e prestativa.\n\
         - Se usar uma ferramenta, sua resposta final deve confirmar o que foi feito com base no retorno da ferramenta.",
    )
}

/// System instruction for the WhatsApp bot, assembled from the user's
/// business profile. Empty fields fall back to neutral defaults.
pub fn bot_instruction(config: &BotConfig) -> String {
    fn or_default<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(fallback)
    }

    format!(
        "Você é {}, um assistente virtual no WhatsApp para o negócio descrito abaixo.\n\
         \n\
         SOBRE O NEGÓCIO:\n\
         {}\n\
         \n\
         PRODUTOS E PREÇOS:\n\
         {}\n\
         \n\
         HORÁRIO DE ATENDIMENTO:\n\
         {}\n\
         \n\
         TOM DE VOZ:\n\
         {}\n\
         \n\
         DIRETRIZES:\n\
         1. Responda de forma curta e natural, como no WhatsApp.\n\
         2. Use emojis moderadamente se o tom permitir.\n\
         3. Jamais invente preços ou produtos não listados.\n\
         4. Se não souber a resposta, peça gentilmente para o cliente aguardar um humano.\n\
         5. Se o cliente demonstrar interesse de compra, use 'create_lead' para registrá-lo.",
        config.bot_name,
        or_default(&config.business_description, "Não informado."),
        or_default(&config.products_and_prices, "Consulte o atendimento."),
        or_default(&config.operating_hours, "Segunda a Sexta, horário comercial."),
        or_default(&config.communication_tone, "Profissional"),
    )
}

/// First message shown when the bot simulator connects.
pub fn bot_greeting(config: &BotConfig) -> String {
    format!(
        "Olá! Eu sou o {}. Bot conectado e pronto para atender.",
        config.bot_name
    )
}
