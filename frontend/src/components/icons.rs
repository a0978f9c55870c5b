use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_cart() -> Html {
    icon_base("M3 3h2l2.4 12.2a2 2 0 002 1.8h8.9a2 2 0 002-1.6L22 7H6M9 21a1 1 0 100-2 1 1 0 000 2zM19 21a1 1 0 100-2 1 1 0 000 2z")
}
pub fn icon_store() -> Html {
    icon_base("M3 9l1.5-5h15L21 9M3 9h18v11H3zM9 20v-6h6v6")
}
pub fn icon_user() -> Html {
    icon_base("M20 21v-2a4 4 0 00-4-4H8a4 4 0 00-4 4v2M12 11a4 4 0 100-8 4 4 0 000 8z")
}
pub fn icon_users() -> Html {
    icon_base("M17 21v-2a4 4 0 00-4-4H5a4 4 0 00-4 4v2M9 11a4 4 0 100-8 4 4 0 000 8zM23 21v-2a4 4 0 00-3-3.9M16 3.1a4 4 0 010 7.8")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_minus() -> Html {
    icon_base("M5 12h14")
}
pub fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M19 6l-1 14H6L5 6")
}
pub fn icon_edit() -> Html {
    icon_base("M12 20h9M16.5 3.5a2.1 2.1 0 013 3L7 19l-4 1 1-4z")
}
pub fn icon_x() -> Html {
    icon_base("M18 6L6 18M6 6l12 12")
}
pub fn icon_search() -> Html {
    icon_base("M11 19a8 8 0 100-16 8 8 0 000 16zM21 21l-4.3-4.3")
}
pub fn icon_package() -> Html {
    icon_base("M21 8l-9-5-9 5v8l9 5 9-5zM3 8l9 5 9-5M12 13v8")
}
pub fn icon_tv() -> Html {
    icon_base("M2 7h20v13H2zM17 2l-5 5-5-5")
}
pub fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
pub fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
pub fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn icon_arrow_up_right() -> Html {
    icon_base("M7 17L17 7M7 7h10v10")
}
pub fn icon_external_link() -> Html {
    icon_base("M18 13v6a2 2 0 01-2 2H5a2 2 0 01-2-2V8a2 2 0 012-2h6M15 3h6v6M10 14L21 3")
}
pub fn icon_message() -> Html {
    icon_base("M21 11.5a8.4 8.4 0 01-12.3 7.4L3 21l2.1-5.7A8.4 8.4 0 1121 11.5z")
}
pub fn icon_arrow_left() -> Html {
    icon_base("M19 12H5M12 19l-7-7 7-7")
}
