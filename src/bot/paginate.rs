//! Button-driven page navigation for multi-embed replies.

use std::time::Duration;

use poise::CreateReply;
use poise::serenity_prelude as serenity;
use tracing::debug;

use super::{Context, Error, GENERIC_FAILURE, to_serenity_embed};
use crate::embed::Embed;
use crate::pagination::{NOT_AUTHOR_COLOR, NOT_AUTHOR_NOTICE, Pager, button_from_custom_id, custom_id, session_prefix};

fn buttons(session: u64, pager: &Pager) -> Vec<serenity::CreateActionRow> {
    let row = pager
        .buttons()
        .iter()
        .map(|state| {
            serenity::CreateButton::new(custom_id(session, state.button))
                .emoji(serenity::ReactionType::Unicode(state.emoji.to_string()))
                .style(serenity::ButtonStyle::Primary)
                .disabled(state.disabled)
        })
        .collect();
    vec![serenity::CreateActionRow::Buttons(row)]
}

/// Send `pages` one at a time. A single page is sent as is; more get
/// ◀️ ▶️ ⏭️ buttons that only the invoking user may press, removed after
/// `timeout` without presses. With no pages the generic failure is sent so
/// the interaction never goes unanswered.
pub async fn paginate(ctx: Context<'_>, pages: &[Embed], timeout: Duration) -> Result<(), Error> {
    let Some(mut pager) = Pager::new(pages.len()) else {
        ctx.say(GENERIC_FAILURE).await?;
        return Ok(());
    };
    let page = |pager: &Pager| to_serenity_embed(&pages[pager.index() - 1]);

    if !pager.needs_buttons() {
        ctx.send(CreateReply::default().embed(page(&pager))).await?;
        return Ok(());
    }

    let session = ctx.id();
    let reply = ctx
        .send(CreateReply::default().embed(page(&pager)).components(buttons(session, &pager)))
        .await?;

    let prefix = session_prefix(session);
    while let Some(press) = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
        .filter({
            let prefix = prefix.clone();
            move |press| press.data.custom_id.starts_with(&prefix)
        })
        .timeout(timeout)
        .await
    {
        if press.user.id != ctx.author().id {
            let notice = serenity::CreateEmbed::new().description(NOT_AUTHOR_NOTICE).colour(NOT_AUTHOR_COLOR);
            press
                .create_response(
                    ctx.serenity_context(),
                    serenity::CreateInteractionResponse::Message(
                        serenity::CreateInteractionResponseMessage::new().embed(notice).ephemeral(true),
                    ),
                )
                .await?;
            continue;
        }

        let Some(button) = button_from_custom_id(session, &press.data.custom_id) else {
            continue;
        };
        pager.press(button);
        debug!(page = pager.index(), total = pager.total(), "page turned");

        press
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .embed(page(&pager))
                        .components(buttons(session, &pager)),
                ),
            )
            .await?;
    }

    reply.edit(ctx, CreateReply::default().embed(page(&pager)).components(vec![])).await?;
    Ok(())
}
