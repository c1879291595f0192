use cursive::views::LinearLayout;

use crate::assembly::stages::Assembled;
use crate::traits::ext::mutex::MutexExt;
use crate::util::error::CmdlineError;

/// The popup on top, the input line below it.
pub fn build_widget(assembled: &Assembled) -> Result<LinearLayout, CmdlineError> {
    let popup = assembled.popup.lock_sync()?.build_view();
    let input = assembled.inputter.lock_sync()?.build_view();

    Ok(LinearLayout::vertical().child(popup).child(input))
}
