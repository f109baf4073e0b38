use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    #[prop_or_default]
    pub message: Option<String>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let Some(message) = props.message.clone() else {
        return Html::default();
    };

    html! {
        <div class="text-red-500 text-center p-2" role="alert">
            { message }
        </div>
    }
}
