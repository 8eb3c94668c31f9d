use parley_llm::{ChatClient, ChatRequest, Message, OpenAIClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("OPENAI_API_KEY")?;
    let client = OpenAIClient::new(api_key)?;

    let request = ChatRequest::new(
        "gpt-4o-mini",
        vec![Message::user("What is the capital of France?")],
    );

    let response = client.chat(request).await?;

    if let Some(usage) = &response.usage {
        println!("Tokens used: {}", usage.total_tokens);
    }
    println!("Response: {}", response.into_text()?);

    Ok(())
}
